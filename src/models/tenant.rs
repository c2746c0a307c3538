//! Tenant model.
//!
//! A tenant is one grooming shop. Every operator-facing query is scoped by
//! tenant id; tenant rows are created lazily the first time an unknown id
//! shows up (see `services::tenant_service::ensure_tenant`).

use chrono::{DateTime, Utc};

/// Represents a tenant record from the database.
///
/// # Database Table
///
/// Maps to the `tenants` table. The `id` is the opaque slug presented by
/// the operator client in the `X-Tenant-Id` header, not a generated UUID:
/// it doubles as the shop's stable external identifier.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tenant {
    /// Tenant slug, unique across the installation
    pub id: String,

    /// Human-readable shop name used in customer-facing messages
    pub display_name: String,

    /// Timestamp when this tenant was first seen
    pub created_at: DateTime<Utc>,
}
