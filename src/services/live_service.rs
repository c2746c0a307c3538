//! Live session validation - token to stream-view resolution.
//!
//! The public live endpoint hands an anonymous customer the masked camera
//! view for their pet's appointment, keyed only by the opaque access token
//! from their magic link. This is the one deliberately tenant-agnostic
//! lookup in the system: tokens are globally unique, and the viewer has no
//! tenant to present.
//!
//! # Masking
//!
//! The response only ever contains the derived relay URL
//! (`{relay_base}/{camera_id}/index.m3u8`). The internal stream source
//! address is not even fetched here.

use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::{
        live::{LiveSessionResponse, LiveSessionRow},
        pet::PetDetails,
    },
    state::AppState,
};

/// Resolve an access token into a live session view.
///
/// # Errors
///
/// `LiveSessionForbidden` for both an unknown token and an expired one.
/// The two cases are indistinguishable on the wire so a caller cannot
/// probe whether a token ever existed.
pub async fn resolve(state: &AppState, token: &str) -> Result<LiveSessionResponse, AppError> {
    let row = sqlx::query_as::<_, LiveSessionRow>(
        r#"
        SELECT p.name AS pet_name,
               p.breed AS pet_breed,
               p.notes AS pet_notes,
               a.status,
               a.camera_id,
               a.token_expires_at,
               t.display_name AS tenant_name
        FROM appointments a
        JOIN pets p ON p.id = a.pet_id
        JOIN tenants t ON t.id = a.tenant_id
        WHERE a.access_token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::LiveSessionForbidden)?;

    if token_expired(row.token_expires_at, Utc::now()) {
        return Err(AppError::LiveSessionForbidden);
    }

    let stream_url = row
        .camera_id
        .as_deref()
        .map(|camera| build_stream_url(&state.config.media_relay_base_url, camera));

    Ok(LiveSessionResponse {
        pet: PetDetails {
            name: row.pet_name,
            breed: row.pet_breed,
            notes: row.pet_notes,
        },
        status: row.status,
        stream_url,
        tenant: row.tenant_name,
    })
}

/// A token is expired when an expiry is recorded and lies strictly before
/// `now`. A missing expiry never expires (revocation clears the token
/// itself instead).
fn token_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(expires_at, Some(expiry) if expiry < now)
}

/// Public playback URL on the media relay for one camera.
fn build_stream_url(relay_base: &str, camera_id: &str) -> String {
    format!("{}/{}/index.m3u8", relay_base.trim_end_matches('/'), camera_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_strictly_before_now_is_expired() {
        let now = Utc::now();
        assert!(token_expired(Some(now - Duration::seconds(1)), now));
        assert!(!token_expired(Some(now), now));
        assert!(!token_expired(Some(now + Duration::hours(1)), now));
    }

    #[test]
    fn missing_expiry_never_expires() {
        assert!(!token_expired(None, Utc::now()));
    }

    #[test]
    fn stream_url_is_relay_base_plus_camera_playlist() {
        assert_eq!(
            build_stream_url("https://relay.example.com", "station-2"),
            "https://relay.example.com/station-2/index.m3u8"
        );
    }

    #[test]
    fn stream_url_tolerates_trailing_slash_on_base() {
        assert_eq!(
            build_stream_url("https://relay.example.com/", "c1"),
            "https://relay.example.com/c1/index.m3u8"
        );
    }
}
