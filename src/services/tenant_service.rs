//! Tenant resolution and idempotent bootstrap.
//!
//! Tenants are provisioned lazily: the first request carrying an unknown
//! tenant id creates the row. The ensure operation is explicit and
//! idempotent (INSERT .. ON CONFLICT DO NOTHING, then read back), so two
//! racing first requests both end up with the same row and neither fails.

use crate::{db::DbPool, error::AppError, models::tenant::Tenant};

/// Fetch the tenant row for `tenant_id`, creating it if missing.
///
/// The freshly created row uses the slug itself as the display name;
/// shops rename themselves later through the admin settings surface.
///
/// # Concurrency
///
/// `ON CONFLICT DO NOTHING` plus the follow-up SELECT makes the operation
/// idempotent. The select is retried once to cover the window where a
/// concurrent delete removes the row between our insert and read.
pub async fn ensure_tenant(pool: &DbPool, tenant_id: &str) -> Result<Tenant, AppError> {
    if tenant_id.is_empty() {
        return Err(AppError::InvalidRequest(
            "Tenant id must not be empty".to_string(),
        ));
    }

    for _ in 0..2 {
        sqlx::query(
            "INSERT INTO tenants (id, display_name) VALUES ($1, $1) ON CONFLICT (id) DO NOTHING",
        )
        .bind(tenant_id)
        .execute(pool)
        .await?;

        if let Some(tenant) =
            sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
                .bind(tenant_id)
                .fetch_optional(pool)
                .await?
        {
            return Ok(tenant);
        }
    }

    Err(AppError::Database(sqlx::Error::RowNotFound))
}
