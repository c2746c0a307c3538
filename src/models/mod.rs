//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the API request/response types derived from them.

/// Appointment workflow model and status machine types
pub mod appointment;
/// Live session view returned to anonymous customers
pub mod live;
/// Pet display models (read-only collaborator)
pub mod pet;
/// Tenant model
pub mod tenant;
