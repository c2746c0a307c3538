//! Public live session HTTP handler.
//!
//! The one endpoint with no tenant scoping: an anonymous customer opens
//! the magic link from their notification and the token alone decides
//! what they may see.

use crate::{
    error::AppError, models::live::LiveSessionResponse, services::live_service, state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};

/// Resolve a live-access token into the session view.
///
/// # Endpoint
///
/// `GET /live/{token}`
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "pet": { "name": "Biscuit", "breed": "Shiba Inu", "notes": null },
///   "status": "bathing",
///   "streamUrl": "https://relay.example.com/station-2/index.m3u8",
///   "tenant": "Sudsy Paws Osaka"
/// }
/// ```
///
/// # Response (403 Forbidden)
///
/// Returned for unknown AND expired tokens, with an identical body:
/// callers cannot distinguish "never existed" from "expired".
pub async fn live_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<LiveSessionResponse>, AppError> {
    let session = live_service::resolve(&state, &token).await?;

    Ok(Json(session))
}
