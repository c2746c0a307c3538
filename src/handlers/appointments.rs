//! Appointment workflow HTTP handlers.
//!
//! This module implements the workflow-related API endpoints:
//! - PATCH /appointments/{id}/status - Move an appointment through the pipeline
//! - GET /appointments/kanban - Status board projection for one day

use crate::{
    error::AppError,
    middleware::tenant::TenantContext,
    models::appointment::{AppointmentResponse, KanbanBoard, KanbanQuery, UpdateStatusRequest},
    services::{kanban_service, transition_service},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Change an appointment's workflow status.
///
/// # Endpoint
///
/// `PATCH /appointments/{id}/status`
///
/// # Request Body
///
/// ```json
/// {
///   "status": "bathing",
///   "camera_id": "station-2"
/// }
/// ```
///
/// # Response
///
/// - **200 OK**: the updated appointment, including a fresh access token
///   when a live status was entered
/// - **400**: unknown status value
/// - **404**: appointment doesn't exist for the calling tenant
///
/// # Side Effects
///
/// Entering bathing/grooming issues a live-access token and attempts a
/// best-effort customer notification; that dispatch can never fail this
/// request.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let updated =
        transition_service::transition_status(&state, &tenant.tenant_id, appointment_id, request)
            .await?;

    Ok(Json(updated))
}

/// Kanban board projection for one tenant and day.
///
/// # Endpoint
///
/// `GET /appointments/kanban?tenantId=shop-osaka&date=2025-06-01`
///
/// # Response (200 OK)
///
/// Object keyed by the six active status names; every key is present,
/// each an array sorted ascending by scheduled time:
///
/// ```json
/// {
///   "scheduled": [ ... ],
///   "reception": [],
///   "bathing": [ ... ],
///   "grooming": [],
///   "drying": [],
///   "ready": []
/// }
/// ```
///
/// Closed appointments (end_time set) never appear.
///
/// # Errors
///
/// - **400**: `tenantId` missing or `date` unparseable
pub async fn kanban(
    State(state): State<AppState>,
    Query(query): Query<KanbanQuery>,
) -> Result<Json<KanbanBoard>, AppError> {
    let tenant_id = query
        .tenant_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Missing tenantId parameter".to_string()))?;

    let board = kanban_service::project_board(&state.pool, tenant_id, query.date.as_deref()).await?;

    Ok(Json(board))
}
