//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle the transition protocol, token issuance, projections,
//! and the best-effort notification dispatch.

pub mod kanban_service;
pub mod live_service;
pub mod notification_service;
pub mod tenant_service;
pub mod token_service;
pub mod transition_service;
