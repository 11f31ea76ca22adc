//! Trainer application and certificate entity models and DTOs.

use pawclass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full application row from the `trainer_applications` table.
///
/// `reviewed_by` and `reviewed_at` are set together, only on a transition
/// away from `pending`, never on creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainerApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub age: Option<i32>,
    pub gender: String,
    pub phone: String,
    pub email_snapshot: String,
    pub intro: Option<String>,
    pub portfolio_link: Option<String>,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A certificate file attached to an application.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainerCertificate {
    pub id: DbId,
    pub application_id: DbId,
    pub file: String,
    pub uploaded_at: Timestamp,
}

/// DTO for submitting a new application.
///
/// `email_snapshot` defaults to the applicant's account email when omitted.
#[derive(Debug, Default, Deserialize)]
pub struct CreateApplication {
    #[serde(default)]
    pub full_name: String,
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub phone: String,
    pub email_snapshot: Option<String>,
    pub intro: Option<String>,
    pub portfolio_link: Option<String>,
}
