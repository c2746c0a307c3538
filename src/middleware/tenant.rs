//! Tenant resolution middleware.
//!
//! This middleware intercepts every operator request to:
//! 1. Extract the tenant slug from the X-Tenant-Id header
//! 2. Ensure the tenant row exists (lazy, idempotent bootstrap)
//! 3. Inject the tenant context into the request
//! 4. Reject tenant-less requests with HTTP 400
//!
//! The public live endpoint does NOT go through this middleware: an
//! anonymous customer has no tenant to present, their token is the only
//! credential.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, services::tenant_service, state::AppState};

/// Header carrying the tenant slug on operator requests.
pub const TENANT_HEADER: &str = "X-Tenant-Id";

/// Tenant context attached to resolved requests.
///
/// This struct is inserted into the request's extension map and can be
/// extracted by route handlers to know which shop is calling.
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// Resolved tenant slug; every store query downstream filters on this
    pub tenant_id: String,

    /// Shop display name, used in customer-facing messages
    pub display_name: String,
}

/// Tenant resolution middleware function.
///
/// # Flow
///
/// 1. Extract `X-Tenant-Id` header from request
/// 2. Ensure the tenant row exists (first sight creates it)
/// 3. Inject `TenantContext` into request, call next handler
/// 4. Missing header: return 400 error
pub async fn tenant_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let tenant_id = request
        .headers()
        .get(TENANT_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| {
            AppError::InvalidRequest(format!("Missing {} header", TENANT_HEADER))
        })?;

    let tenant = tenant_service::ensure_tenant(&state.pool, &tenant_id).await?;

    let context = TenantContext {
        tenant_id: tenant.id,
        display_name: tenant.display_name,
    };

    // Route handlers extract this with Extension<TenantContext>
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
