//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Resolve the calling tenant
//! - Modify request/response
//! - Short-circuit requests (reject tenant-less operator calls)

/// Tenant resolution middleware
pub mod tenant;
