//! Course and course-round entity models and DTOs.

use chrono::NaiveTime;
use pawclass_core::benefits::benefits_list;
use pawclass_core::schedule::display_days;
use pawclass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full course row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub trainer_id: DbId,
    pub title: String,
    pub description: String,
    pub duration_hr: i32,
    pub price: f64,
    pub deposit_price: f64,
    pub cover_image: Option<String>,
    pub location: String,
    pub max_dogs: Option<i32>,
    pub benefits: String,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A scheduled recurring session slot under a course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseRound {
    pub id: DbId,
    pub course_id: DbId,
    /// Weekday indices 0=Monday..6=Sunday, stored sorted and deduplicated.
    pub days: Vec<i16>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// One submitted round in a course create/update payload.
///
/// `id` is present for rounds that already exist (update-in-place); absent
/// for new rounds. Stored rounds whose id is not resubmitted are deleted.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundInput {
    pub id: Option<DbId>,
    #[serde(default)]
    pub days: Vec<i16>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// DTO for creating a new course (with its initial rounds).
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_hr: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub deposit_price: f64,
    #[serde(default)]
    pub location: String,
    pub max_dogs: Option<i32>,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub rounds: Vec<RoundInput>,
}

/// DTO for updating an existing course. Scalar fields are optional;
/// `rounds`, when present, is the full replace-set for the course.
#[derive(Debug, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_hr: Option<i32>,
    pub price: Option<f64>,
    pub deposit_price: Option<f64>,
    pub location: Option<String>,
    pub max_dogs: Option<i32>,
    pub benefits: Option<String>,
    pub is_published: Option<bool>,
    pub rounds: Option<Vec<RoundInput>>,
}

/// Round representation for API responses, with display labels attached.
#[derive(Debug, Clone, Serialize)]
pub struct RoundView {
    pub id: DbId,
    pub days: Vec<i16>,
    pub day_labels: Vec<&'static str>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl From<CourseRound> for RoundView {
    fn from(round: CourseRound) -> Self {
        let day_labels = display_days(&round.days);
        RoundView {
            id: round.id,
            days: round.days,
            day_labels,
            start_time: round.start_time,
            end_time: round.end_time,
        }
    }
}

/// Course representation for API responses, with derived display data.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub benefits_list: Vec<String>,
    pub rounds: Vec<RoundView>,
}

impl CourseDetail {
    pub fn new(course: Course, rounds: Vec<CourseRound>) -> Self {
        let benefits_list = benefits_list(&course.benefits);
        CourseDetail {
            benefits_list,
            rounds: rounds.into_iter().map(RoundView::from).collect(),
            course,
        }
    }
}
