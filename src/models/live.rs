//! Live session view models.
//!
//! The live session view is derived on demand from a valid access token.
//! It exposes only customer-safe fields: pet display data, the workflow
//! status, the tenant's display name, and a stream URL pointing at the
//! public media relay. The internal camera source address never appears
//! anywhere in this module.

use serde::Serialize;

use crate::models::pet::PetDetails;

/// Joined row backing the live session view.
///
/// Fetched in a single query by exact token match: appointment joined with
/// its pet and tenant. Tenant-agnostic by design, the anonymous viewer has
/// no tenant header to offer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LiveSessionRow {
    pub pet_name: String,
    pub pet_breed: Option<String>,
    pub pet_notes: Option<String>,
    pub status: String,
    pub camera_id: Option<String>,
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub tenant_name: String,
}

/// Response body for `GET /live/{token}`.
///
/// # JSON Example
///
/// ```json
/// {
///   "pet": { "name": "Biscuit", "breed": "Shiba Inu", "notes": "Nervous around dryers" },
///   "status": "bathing",
///   "streamUrl": "https://relay.example.com/station-2/index.m3u8",
///   "tenant": "Sudsy Paws Osaka"
/// }
/// ```
///
/// `streamUrl` is null until a camera is assigned to the appointment.
#[derive(Debug, Serialize)]
pub struct LiveSessionResponse {
    pub pet: PetDetails,

    pub status: String,

    #[serde(rename = "streamUrl")]
    pub stream_url: Option<String>,

    pub tenant: String,
}
