//! Appointment data models and API request/response types.
//!
//! This module defines:
//! - `AppointmentStatus`: the workflow status pipeline
//! - `Appointment`: database entity for one grooming appointment
//! - Request/response types for the status transition endpoint
//! - Kanban card/board types for the status board projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::pet::PetSummary;

/// Workflow status of an appointment.
///
/// The pipeline runs scheduled → reception → bathing → grooming → drying →
/// ready → done, but the engine deliberately allows any status-to-status
/// move so operators can correct mistakes by dragging a card backward.
///
/// # Closure Encoding
///
/// `Done` is never persisted: completing an appointment writes `ready` plus
/// a non-null `end_time`. A row with `end_time` set is closed and excluded
/// from every active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Reception,
    Bathing,
    Grooming,
    Drying,
    Ready,
    Done,
}

impl AppointmentStatus {
    /// The six statuses that appear as kanban columns. `Done` is absent
    /// because closed rows never reach the board.
    pub const ACTIVE: [AppointmentStatus; 6] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Reception,
        AppointmentStatus::Bathing,
        AppointmentStatus::Grooming,
        AppointmentStatus::Drying,
        AppointmentStatus::Ready,
    ];

    /// Parse a status from its wire/storage form.
    ///
    /// Case-insensitive: the dashboard sends lowercase but older clients
    /// sent uppercase column names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "scheduled" => Some(Self::Scheduled),
            "reception" => Some(Self::Reception),
            "bathing" => Some(Self::Bathing),
            "grooming" => Some(Self::Grooming),
            "drying" => Some(Self::Drying),
            "ready" => Some(Self::Ready),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Canonical lowercase form used in the database and in responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Reception => "reception",
            Self::Bathing => "bathing",
            Self::Grooming => "grooming",
            Self::Drying => "drying",
            Self::Ready => "ready",
            Self::Done => "done",
        }
    }

    /// Whether entering this status grants live camera access.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Bathing | Self::Grooming)
    }
}

/// Represents an appointment record from the database.
///
/// # Database Table
///
/// Maps to the `appointments` table. Each appointment:
/// - Belongs to one tenant (all operator queries filter by `tenant_id`)
/// - References exactly one pet, optionally a staff member and a camera
/// - Carries at most one live-access token at a time
///
/// `status` is kept as a raw string here: rows written by older versions
/// may hold values outside the current pipeline, and read-side views must
/// tolerate them instead of failing to decode the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Appointment {
    /// Unique identifier for this appointment
    pub id: Uuid,

    /// Owning tenant, immutable after creation
    pub tenant_id: String,

    /// Pet being groomed
    pub pet_id: Uuid,

    /// Assigned staff member, if any
    pub staff_id: Option<Uuid>,

    /// Camera covering the grooming station, present only while live-gated
    pub camera_id: Option<String>,

    /// When the appointment is booked for
    pub scheduled_at: DateTime<Utc>,

    /// Set exactly once, when the appointment is completed
    pub end_time: Option<DateTime<Utc>>,

    /// Current workflow status (raw storage form)
    pub status: String,

    /// Active live-access token, unique across all appointments
    ///
    /// Non-null only after the last transition entered bathing or grooming.
    pub access_token: Option<String>,

    /// When the live-access token stops resolving
    pub token_expires_at: Option<DateTime<Utc>>,

    /// When the appointment row was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Request body for `PATCH /appointments/{id}/status`.
///
/// # JSON Example
///
/// ```json
/// {
///   "status": "bathing",
///   "camera_id": "station-2"
/// }
/// ```
///
/// `camera_id` is only meaningful when entering a live status; when absent
/// the current camera assignment (possibly none) is kept.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Requested workflow status
    pub status: String,

    /// Camera to attach when entering a live status
    pub camera_id: Option<String>,
}

/// Response returned by the status transition endpoint.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "pet_id": "550e8400-e29b-41d4-a716-446655440000",
///   "pet": { "name": "Biscuit", "breed": "Shiba Inu" },
///   "staff_id": null,
///   "camera_id": "station-2",
///   "scheduled_at": "2025-06-01T10:00:00Z",
///   "end_time": null,
///   "status": "bathing",
///   "access_token": "3f29ab...",
///   "token_expires_at": "2025-06-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub pet: PetSummary,
    pub staff_id: Option<Uuid>,
    pub camera_id: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: String,
    pub access_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl AppointmentResponse {
    /// Combine the updated row with the joined pet fields.
    pub fn from_parts(appointment: Appointment, pet: PetSummary) -> Self {
        Self {
            id: appointment.id,
            pet_id: appointment.pet_id,
            pet,
            staff_id: appointment.staff_id,
            camera_id: appointment.camera_id,
            scheduled_at: appointment.scheduled_at,
            end_time: appointment.end_time,
            status: appointment.status,
            access_token: appointment.access_token,
            token_expires_at: appointment.token_expires_at,
        }
    }
}

/// Query parameters for `GET /appointments/kanban`.
///
/// `tenantId` is required (400 when missing); `date` is an optional
/// `YYYY-MM-DD` day, defaulting to today in UTC.
#[derive(Debug, Deserialize)]
pub struct KanbanQuery {
    #[serde(rename = "tenantId")]
    pub tenant_id: Option<String>,

    pub date: Option<String>,
}

/// One card on the kanban board: an appointment joined with its pet name.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct KanbanCard {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: String,
    pub pet_breed: Option<String>,
    pub staff_id: Option<Uuid>,
    pub camera_id: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
}

/// The kanban board: one column per active status.
///
/// Columns are always present in the response, empty or not, so the
/// dashboard never has to special-case missing keys.
#[derive(Debug, Default, Serialize)]
pub struct KanbanBoard {
    pub scheduled: Vec<KanbanCard>,
    pub reception: Vec<KanbanCard>,
    pub bathing: Vec<KanbanCard>,
    pub grooming: Vec<KanbanCard>,
    pub drying: Vec<KanbanCard>,
    pub ready: Vec<KanbanCard>,
}

impl KanbanBoard {
    /// Column for a given active status. `Done` has no column.
    pub fn column_mut(&mut self, status: AppointmentStatus) -> Option<&mut Vec<KanbanCard>> {
        match status {
            AppointmentStatus::Scheduled => Some(&mut self.scheduled),
            AppointmentStatus::Reception => Some(&mut self.reception),
            AppointmentStatus::Bathing => Some(&mut self.bathing),
            AppointmentStatus::Grooming => Some(&mut self.grooming),
            AppointmentStatus::Drying => Some(&mut self.drying),
            AppointmentStatus::Ready => Some(&mut self.ready),
            AppointmentStatus::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_statuses() {
        for status in AppointmentStatus::ACTIVE {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(
            AppointmentStatus::parse("done"),
            Some(AppointmentStatus::Done)
        );
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            AppointmentStatus::parse("BATHING"),
            Some(AppointmentStatus::Bathing)
        );
        assert_eq!(
            AppointmentStatus::parse("Ready"),
            Some(AppointmentStatus::Ready)
        );
    }

    #[test]
    fn rejects_unknown_status() {
        assert_eq!(AppointmentStatus::parse("shampooing"), None);
        assert_eq!(AppointmentStatus::parse(""), None);
    }

    #[test]
    fn only_bathing_and_grooming_are_live() {
        assert!(AppointmentStatus::Bathing.is_live());
        assert!(AppointmentStatus::Grooming.is_live());
        assert!(!AppointmentStatus::Drying.is_live());
        assert!(!AppointmentStatus::Done.is_live());
    }

    #[test]
    fn done_has_no_kanban_column() {
        let mut board = KanbanBoard::default();
        assert!(board.column_mut(AppointmentStatus::Done).is_none());
        assert!(board.column_mut(AppointmentStatus::Ready).is_some());
    }
}
