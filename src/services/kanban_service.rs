//! Kanban board projection - read-side view of today's appointments.
//!
//! Pure presentation query: appointments for one tenant scheduled within a
//! single UTC day, not yet closed, partitioned into the six active status
//! columns and sorted by schedule time. Nothing here mutates state.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    db::DbPool,
    error::AppError,
    models::appointment::{AppointmentStatus, KanbanBoard, KanbanCard},
};

/// Project the kanban board for one tenant and day.
///
/// `date` is an optional `YYYY-MM-DD` string; missing means today (UTC).
///
/// # Row Selection
///
/// - `scheduled_at` within the day window
/// - `end_time IS NULL` (closed appointments never appear)
/// - ascending `scheduled_at`, preserved within each column
///
/// # Errors
///
/// - `InvalidRequest`: unparseable date
/// - `Database`: store unreachable
pub async fn project_board(
    pool: &DbPool,
    tenant_id: &str,
    date: Option<&str>,
) -> Result<KanbanBoard, AppError> {
    let day = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidRequest(format!("Invalid date: {}", raw)))?,
        None => Utc::now().date_naive(),
    };
    let (start, end) = day_bounds(day);

    let cards = sqlx::query_as::<_, KanbanCard>(
        r#"
        SELECT a.id,
               a.pet_id,
               p.name AS pet_name,
               p.breed AS pet_breed,
               a.staff_id,
               a.camera_id,
               a.scheduled_at,
               a.status
        FROM appointments a
        JOIN pets p ON p.id = a.pet_id
        WHERE a.tenant_id = $1
          AND a.scheduled_at >= $2
          AND a.scheduled_at < $3
          AND a.end_time IS NULL
        ORDER BY a.scheduled_at ASC
        "#,
    )
    .bind(tenant_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(group_cards(cards))
}

/// Half-open UTC window `[00:00, 00:00 next day)` for one calendar day.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    (start, start + Duration::days(1))
}

/// Partition cards into board columns.
///
/// Rows whose stored status is not a known active status are dropped:
/// older rows can hold retired status values and must not break the board.
fn group_cards(cards: Vec<KanbanCard>) -> KanbanBoard {
    let mut board = KanbanBoard::default();

    for card in cards {
        let Some(status) = AppointmentStatus::parse(&card.status) else {
            tracing::debug!(appointment_id = %card.id, status = %card.status,
                "Dropping card with unknown status from board");
            continue;
        };
        if let Some(column) = board.column_mut(status) {
            column.push(card);
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn card(status: &str, scheduled_at: DateTime<Utc>) -> KanbanCard {
        KanbanCard {
            id: Uuid::new_v4(),
            pet_id: Uuid::new_v4(),
            pet_name: "Biscuit".to_string(),
            pet_breed: None,
            staff_id: None,
            camera_id: None,
            scheduled_at,
            status: status.to_string(),
        }
    }

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let (start, end) = day_bounds(day);

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn cards_land_in_their_status_columns() {
        let now = Utc::now();
        let board = group_cards(vec![
            card("scheduled", now),
            card("bathing", now),
            card("bathing", now),
            card("ready", now),
        ]);

        assert_eq!(board.scheduled.len(), 1);
        assert_eq!(board.bathing.len(), 2);
        assert_eq!(board.ready.len(), 1);
        assert!(board.grooming.is_empty());
    }

    #[test]
    fn unknown_statuses_are_dropped_not_fatal() {
        let now = Utc::now();
        let board = group_cards(vec![card("shampooing", now), card("drying", now)]);

        assert_eq!(board.drying.len(), 1);
        assert!(board.scheduled.is_empty());
    }

    #[test]
    fn query_order_is_preserved_within_a_column() {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
        let board = group_cards(vec![card("grooming", t0), card("grooming", t1)]);

        assert_eq!(board.grooming[0].scheduled_at, t0);
        assert_eq!(board.grooming[1].scheduled_at, t1);
    }
}
