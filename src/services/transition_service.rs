//! Status transition engine - core workflow logic for appointments.
//!
//! This service handles:
//! - Validating a requested status change
//! - Deriving the side effects of the move (token issuance/revocation,
//!   closure stamping) as a pure `TransitionPlan`
//! - Persisting the combined result in one atomic row update
//! - Kicking off the best-effort "live link ready" notification
//!
//! # Transition Policy
//!
//! Any status is reachable from any other; operators fix mistakes by
//! moving a card backward. What changes per target status:
//!
//! - **bathing / grooming**: a fresh live-access token is issued (the old
//!   one, if any, is implicitly revoked), the camera assignment is updated,
//!   and a notification is attempted
//! - **done**: persisted as `ready` with `end_time` stamped; token, camera
//!   and expiry are cleared
//! - **anything else**: token, camera and expiry are cleared; `end_time`
//!   is reset so a closed appointment can be reopened

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        appointment::{Appointment, AppointmentResponse, AppointmentStatus, UpdateStatusRequest},
        pet::{PetContactRow, PetSummary},
    },
    services::{notification_service, token_service},
    state::AppState,
};

/// The fully derived outcome of one status change, computed before any
/// write happens. Everything the UPDATE statement needs, plus whether a
/// notification should be attempted afterwards.
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    /// Status actually written to the row (`done` is remapped to `ready`)
    pub persisted_status: AppointmentStatus,
    pub camera_id: Option<String>,
    pub access_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Attempt the "live link ready" dispatch after the update
    pub notify: bool,
}

impl TransitionPlan {
    /// Derive the plan for moving an appointment to `requested`.
    ///
    /// `supplied_camera` comes from the request body; `current_camera` is
    /// the row's existing assignment, kept when the request omits one so a
    /// camera attached earlier survives a bathing → grooming move.
    pub fn compute(
        requested: AppointmentStatus,
        supplied_camera: Option<String>,
        current_camera: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        if requested.is_live() {
            let issued = token_service::issue(now);
            return Self {
                persisted_status: requested,
                camera_id: supplied_camera.or(current_camera),
                access_token: Some(issued.token),
                token_expires_at: Some(issued.expires_at),
                end_time: None,
                notify: true,
            };
        }

        if requested == AppointmentStatus::Done {
            // Closure encoding: done is stored as ready + end_time.
            return Self {
                persisted_status: AppointmentStatus::Ready,
                camera_id: None,
                access_token: None,
                token_expires_at: None,
                end_time: Some(now),
                notify: false,
            };
        }

        Self {
            persisted_status: requested,
            camera_id: None,
            access_token: None,
            token_expires_at: None,
            end_time: None,
            notify: false,
        }
    }
}

/// Apply a status change to an appointment.
///
/// # Process
///
/// 1. Validate the requested status string
/// 2. Load the appointment, scoped by tenant
/// 3. Compute the transition plan
/// 4. Persist the plan as a single atomic UPDATE
/// 5. Fetch pet/customer/tenant display fields
/// 6. If the plan says so, fire the notification as a detached task
///
/// # Errors
///
/// - `InvalidStatus`: unknown status value
/// - `AppointmentNotFound`: no such appointment for this tenant
/// - `Database`: store unreachable or query failure
///
/// Notification failures never surface here; they are logged by the
/// detached task.
pub async fn transition_status(
    state: &AppState,
    tenant_id: &str,
    appointment_id: Uuid,
    request: UpdateStatusRequest,
) -> Result<AppointmentResponse, AppError> {
    let requested = AppointmentStatus::parse(&request.status)
        .ok_or_else(|| AppError::InvalidStatus(request.status.clone()))?;

    // Load the current row, scoped by tenant so one shop can never move
    // another shop's appointments.
    let current = sqlx::query_as::<_, Appointment>(
        "SELECT * FROM appointments WHERE id = $1 AND tenant_id = $2",
    )
    .bind(appointment_id)
    .bind(tenant_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::AppointmentNotFound)?;

    let plan = TransitionPlan::compute(requested, request.camera_id, current.camera_id, Utc::now());

    // One atomic write: status, camera, token triple, and closure marker
    // all land together. Last write wins on concurrent moves of the same
    // appointment; there is no optimistic locking.
    let updated = sqlx::query_as::<_, Appointment>(
        r#"
        UPDATE appointments
        SET status = $1,
            camera_id = $2,
            access_token = $3,
            token_expires_at = $4,
            end_time = $5,
            updated_at = NOW()
        WHERE id = $6 AND tenant_id = $7
        RETURNING *
        "#,
    )
    .bind(plan.persisted_status.as_str())
    .bind(&plan.camera_id)
    .bind(&plan.access_token)
    .bind(plan.token_expires_at)
    .bind(plan.end_time)
    .bind(appointment_id)
    .bind(tenant_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::AppointmentNotFound)?;

    // Pet, customer and tenant display fields: needed for the response and
    // for the notification recipient.
    let contact = sqlx::query_as::<_, PetContactRow>(
        r#"
        SELECT p.name AS pet_name,
               p.breed AS pet_breed,
               c.phone AS customer_phone,
               t.display_name AS tenant_name
        FROM pets p
        JOIN customers c ON c.id = p.customer_id
        JOIN tenants t ON t.id = p.tenant_id
        WHERE p.id = $1
        "#,
    )
    .bind(updated.pet_id)
    .fetch_one(&state.pool)
    .await?;

    if plan.notify {
        dispatch_live_notification(state, &updated, &contact);
    }

    let pet = PetSummary {
        name: contact.pet_name,
        breed: contact.pet_breed,
    };
    Ok(AppointmentResponse::from_parts(updated, pet))
}

/// Fire the "live link ready" notification as a detached task.
///
/// The durable state change is already committed at this point; whatever
/// happens here is only ever observable in the logs. Missing recipient
/// data downgrades to a warning and skips the dispatch entirely.
fn dispatch_live_notification(state: &AppState, appointment: &Appointment, contact: &PetContactRow) {
    let Some(token) = appointment.access_token.clone() else {
        // Unreachable for live transitions; guard anyway so a future
        // policy change cannot panic here.
        return;
    };

    let Some(phone) = contact.customer_phone.clone() else {
        tracing::warn!(
            appointment_id = %appointment.id,
            "Skipping live notification: customer has no phone number"
        );
        return;
    };

    if contact.pet_name.is_empty() || contact.tenant_name.is_empty() {
        tracing::warn!(
            appointment_id = %appointment.id,
            "Skipping live notification: missing pet or tenant display name"
        );
        return;
    }

    let magic_link = format!(
        "{}/live/{}",
        state.config.live_link_base_url.trim_end_matches('/'),
        token
    );

    let notification = notification_service::LiveLinkNotification {
        pet_name: contact.pet_name.clone(),
        customer_phone: phone,
        magic_link,
        tenant_name: contact.tenant_name.clone(),
    };

    let config = state.config.clone();
    let appointment_id = appointment.id;
    tokio::spawn(async move {
        if let Err(e) = notification_service::send_live_link(&config, &notification).await {
            tracing::warn!(
                appointment_id = %appointment_id,
                "Live notification dispatch failed: {:?}",
                e
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn entering_bathing_issues_token_and_notifies() {
        let now = Utc::now();
        let plan = TransitionPlan::compute(
            AppointmentStatus::Bathing,
            Some("station-1".to_string()),
            None,
            now,
        );

        assert_eq!(plan.persisted_status, AppointmentStatus::Bathing);
        assert_eq!(plan.camera_id.as_deref(), Some("station-1"));
        assert!(plan.access_token.is_some());
        assert_eq!(plan.token_expires_at, Some(now + Duration::hours(2)));
        assert!(plan.end_time.is_none());
        assert!(plan.notify);
    }

    #[test]
    fn entering_grooming_without_camera_keeps_current_assignment() {
        let plan = TransitionPlan::compute(
            AppointmentStatus::Grooming,
            None,
            Some("station-7".to_string()),
            Utc::now(),
        );

        assert_eq!(plan.camera_id.as_deref(), Some("station-7"));
        assert!(plan.access_token.is_some());
        assert!(plan.notify);
    }

    #[test]
    fn reentering_a_live_status_replaces_the_token() {
        let now = Utc::now();
        let first = TransitionPlan::compute(AppointmentStatus::Bathing, None, None, now);
        let second = TransitionPlan::compute(AppointmentStatus::Bathing, None, None, now);

        assert_ne!(first.access_token, second.access_token);
    }

    #[test]
    fn done_is_remapped_to_ready_with_closure_stamp() {
        let now = Utc::now();
        let plan = TransitionPlan::compute(
            AppointmentStatus::Done,
            Some("station-1".to_string()),
            Some("station-1".to_string()),
            now,
        );

        assert_eq!(plan.persisted_status, AppointmentStatus::Ready);
        assert_eq!(plan.end_time, Some(now));
        assert!(plan.access_token.is_none());
        assert!(plan.camera_id.is_none());
        assert!(plan.token_expires_at.is_none());
        assert!(!plan.notify);
    }

    #[test]
    fn non_live_statuses_clear_access_fields() {
        let now = Utc::now();
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Reception,
            AppointmentStatus::Drying,
            AppointmentStatus::Ready,
        ] {
            let plan =
                TransitionPlan::compute(status, None, Some("station-3".to_string()), now);

            assert_eq!(plan.persisted_status, status);
            assert!(plan.access_token.is_none());
            assert!(plan.camera_id.is_none());
            assert!(plan.token_expires_at.is_none());
            assert!(plan.end_time.is_none());
            assert!(!plan.notify);
        }
    }
}
