//! Pet display models.
//!
//! Pet (and customer) records are owned by the admin CRUD surface; the
//! workflow core only reads them to decorate appointment responses, to
//! build the live session view, and to find the notification recipient.

use serde::Serialize;

/// Compact pet fields embedded in appointment responses.
#[derive(Debug, Clone, Serialize)]
pub struct PetSummary {
    pub name: String,
    pub breed: Option<String>,
}

/// Full pet display fields shown to the anonymous live viewer.
#[derive(Debug, Clone, Serialize)]
pub struct PetDetails {
    pub name: String,
    pub breed: Option<String>,
    pub notes: Option<String>,
}

/// Joined row used by the transition engine after an update: the pet and
/// customer fields needed for the response and the notification, fetched
/// in one query.
///
/// `customer_phone` and `tenant_name` may be missing; the engine then
/// skips the notification rather than failing the transition.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PetContactRow {
    pub pet_name: String,
    pub pet_breed: Option<String>,
    pub customer_phone: Option<String>,
    pub tenant_name: String,
}
