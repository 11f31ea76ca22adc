//! Booking entity model and DTOs.

use pawclass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    /// Nulls out if the referenced round is deleted; the booking survives.
    pub round_id: Option<DbId>,
    pub owner_full_name: String,
    pub owner_nickname: String,
    pub owner_phone: String,
    pub dog_name: String,
    pub dog_count: i32,
    pub dog_gender: String,
    pub dog_age_year: i32,
    pub dog_breed: String,
    pub message: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a booking against a course.
#[derive(Debug, Deserialize)]
pub struct CreateBooking {
    pub round_id: Option<DbId>,
    pub owner_full_name: String,
    #[serde(default)]
    pub owner_nickname: String,
    pub owner_phone: String,
    #[serde(default)]
    pub dog_name: String,
    #[serde(default = "default_dog_count")]
    pub dog_count: i32,
    #[serde(default)]
    pub dog_gender: String,
    #[serde(default)]
    pub dog_age_year: i32,
    #[serde(default)]
    pub dog_breed: String,
    #[serde(default)]
    pub message: String,
}

fn default_dog_count() -> i32 {
    1
}
