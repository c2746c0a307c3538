//! Notification dispatch for "live link ready" events.
//!
//! When an appointment enters a live status, the customer gets a message
//! with a magic link to the masked camera stream. Delivery goes through an
//! external messaging endpoint (SMS gateway, LINE bot, whatever the
//! deployment wires up) configured via `NOTIFY_ENDPOINT_URL`.
//!
//! # Delivery Semantics
//!
//! Strictly best-effort and fire-and-forget:
//! - No endpoint configured: the dispatcher is a no-op, not an error
//! - Endpoint unreachable, slow, or unhappy: logged and dropped
//! - A 5-second timeout bounds every attempt
//!
//! The transition that triggered the notification has already been
//! committed by the time this module runs; nothing here can undo it.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::config::Config;

type HmacSha256 = Hmac<Sha256>;

/// Recipient and content fields for one live-link message.
#[derive(Debug, Clone, Serialize)]
pub struct LiveLinkNotification {
    pub pet_name: String,
    pub customer_phone: String,
    pub magic_link: String,
    pub tenant_name: String,
}

/// Full payload sent to the notification endpoint.
///
/// # Example
///
/// ```json
/// {
///   "event_type": "appointment.live",
///   "event_id": "550e8400-e29b-41d4-a716-446655440000",
///   "created_at": "2025-06-01T10:30:00Z",
///   "data": {
///     "pet_name": "Biscuit",
///     "customer_phone": "+81-90-0000-0000",
///     "magic_link": "https://salon.example.com/live/3f29ab...",
///     "tenant_name": "Sudsy Paws Osaka"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct NotificationPayload {
    pub event_type: String,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub data: LiveLinkNotification,
}

impl NotificationPayload {
    pub fn new(event_id: Uuid, data: LiveLinkNotification) -> Self {
        Self {
            event_type: "appointment.live".to_string(),
            event_id,
            created_at: Utc::now(),
            data,
        }
    }
}

/// Send one live-link notification.
///
/// # Headers Sent
///
/// - `Content-Type: application/json`
/// - `X-Notify-Event-Id: <uuid>`
/// - `X-Notify-Signature: sha256=<hex>` (only when NOTIFY_SECRET is set)
///
/// # Errors
///
/// Returns an error string for the caller to log. Callers never propagate
/// this further; delivery failure must stay invisible to the operator who
/// moved the card.
pub async fn send_live_link(
    config: &Config,
    notification: &LiveLinkNotification,
) -> Result<(), String> {
    let Some(endpoint) = config.notify_endpoint_url.as_deref() else {
        tracing::debug!("No notification endpoint configured, skipping dispatch");
        return Ok(());
    };

    let event_id = Uuid::new_v4();
    let payload = NotificationPayload::new(event_id, notification.clone());
    let payload_json = serde_json::to_string(&payload)
        .map_err(|e| format!("Failed to serialize payload: {}", e))?;

    let client = reqwest::Client::builder()
        // Bounded so a stalled gateway can never hold a dispatch task open
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .map_err(|e| format!("HTTP client error: {}", e))?;

    let mut request = client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .header("X-Notify-Event-Id", event_id.to_string());

    if let Some(secret) = config.notify_secret.as_deref() {
        request = request.header(
            "X-Notify-Signature",
            generate_signature(secret, &payload_json),
        );
    }

    let response = request
        .body(payload_json)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!(
            "Notification endpoint returned {}",
            response.status()
        ));
    }

    tracing::info!(event_id = %event_id, "Live notification delivered");
    Ok(())
}

/// Generate HMAC-SHA256 signature for a notification payload.
///
/// # Format
///
/// `sha256=<hex_encoded_hmac>`
///
/// Receivers verify by recomputing HMAC-SHA256(secret, request_body) and
/// comparing in constant time.
fn generate_signature(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key length is valid");
    mac.update(payload.as_bytes());
    let result = mac.finalize();
    format!("sha256={}", hex::encode(result.into_bytes()))
}

/// Validate the configured notification endpoint URL.
///
/// Called once at startup so a typo fails fast instead of silently eating
/// every dispatch.
///
/// # Rules
///
/// - Must be a valid URL
/// - Must be HTTPS (HTTP allowed for localhost in development)
/// - Maximum 2048 characters
pub fn validate_endpoint_url(url: &str) -> Result<(), String> {
    if url.len() > 2048 {
        return Err("URL exceeds 2048 characters".to_string());
    }

    let parsed = url::Url::parse(url).map_err(|_| "Invalid URL format".to_string())?;

    match parsed.scheme() {
        "https" => Ok(()),
        "http" => {
            // Allow HTTP for localhost/127.0.0.1 (testing)
            if parsed.host_str() == Some("localhost")
                || parsed.host_str() == Some("127.0.0.1")
                || parsed.host_str() == Some("0.0.0.0")
            {
                Ok(())
            } else {
                Err("HTTP is only allowed for localhost. Use HTTPS for production.".to_string())
            }
        }
        _ => Err("URL must use HTTP or HTTPS".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_has_sha256_prefix_and_hex_body() {
        let sig = generate_signature("secret", r#"{"k":"v"}"#);
        let hex_part = sig.strip_prefix("sha256=").expect("prefix");
        assert_eq!(hex_part.len(), 64);
        assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_is_deterministic_per_secret_and_payload() {
        assert_eq!(
            generate_signature("secret", "payload"),
            generate_signature("secret", "payload")
        );
        assert_ne!(
            generate_signature("secret", "payload"),
            generate_signature("other", "payload")
        );
    }

    #[test]
    fn accepts_https_and_local_http_endpoints() {
        assert!(validate_endpoint_url("https://notify.example.com/hook").is_ok());
        assert!(validate_endpoint_url("http://localhost:9000/hook").is_ok());
        assert!(validate_endpoint_url("http://127.0.0.1/hook").is_ok());
    }

    #[test]
    fn rejects_remote_http_and_other_schemes() {
        assert!(validate_endpoint_url("http://notify.example.com/hook").is_err());
        assert!(validate_endpoint_url("ftp://example.com").is_err());
        assert!(validate_endpoint_url("not a url").is_err());
    }
}
