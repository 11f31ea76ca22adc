//! Booking workflow handlers.
//!
//! Requester side: create against a visible course, view history, cancel a
//! pending booking. Trainer side: list/filter the inbox, approve or reject,
//! delete. Trainer-scoped fetches miss identically for "not yours" and
//! "does not exist".

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pawclass_core::booking::{self, STATUS_CANCELED};
use pawclass_core::error::CoreError;
use pawclass_core::types::DbId;
use pawclass_db::models::booking::CreateBooking;
use pawclass_db::repositories::{BookingRepo, CourseRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireTrainer, RequireUser};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for the trainer booking inbox.
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
}

/// Request body for a trainer's decision on a pending booking.
#[derive(Debug, Deserialize)]
pub struct DecideInput {
    pub decision: String,
}

/* --------------------------------------------------------------------------
Requester side
-------------------------------------------------------------------------- */

/// POST /courses/{course_id}/bookings
///
/// Reserve a spot on another user's published course. Self-booking is
/// always refused; when the course has rounds the request must name one of
/// that course's own rounds.
pub async fn create_booking(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateBooking>,
) -> AppResult<impl IntoResponse> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    // Self-booking is refused before the visibility rule is applied, so an
    // owner probing their own unpublished course still gets the refusal.
    if course.trainer_id == user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot book your own course".into(),
        )));
    }

    if CourseRepo::find_published(&state.pool, course_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }));
    }

    if input.dog_count < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Dog count must be at least 1".into(),
        )));
    }
    if input.dog_age_year < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Dog age must not be negative".into(),
        )));
    }

    let rounds = CourseRepo::rounds_for_course(&state.pool, course.id).await?;
    let round_id = if rounds.is_empty() {
        // No rounds to choose from; the selection is omitted entirely.
        if input.round_id.is_some() {
            return Err(AppError::Core(CoreError::Validation(
                "This course has no rounds to select".into(),
            )));
        }
        None
    } else {
        let round_id = input.round_id.ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "A round selection is required for this course".into(),
            ))
        })?;
        if !rounds.iter().any(|r| r.id == round_id) {
            return Err(AppError::Core(CoreError::Validation(
                "Selected round does not belong to this course".into(),
            )));
        }
        Some(round_id)
    };

    let booking = BookingRepo::create(&state.pool, user.id, course.id, round_id, &input).await?;

    tracing::info!(
        user_id = user.id,
        course_id = course.id,
        booking_id = booking.id,
        "Booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Booking submitted, awaiting the trainer's decision".to_string(),
            data: booking,
        }),
    ))
}

/// GET /bookings
///
/// The requester's own booking history, newest first.
pub async fn my_bookings(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let bookings = BookingRepo::list_for_user(&state.pool, user.id).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /bookings/{id}
pub async fn booking_detail(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = BookingRepo::find_for_user(&state.pool, id, user.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(Json(DataResponse { data: booking }))
}

/// POST /bookings/{id}/cancel
///
/// Withdraw a pending booking. Terminal bookings conflict.
pub async fn cancel_booking(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = BookingRepo::find_for_user(&state.pool, id, user.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    match BookingRepo::transition_for_user(&state.pool, booking.id, user.id, STATUS_CANCELED)
        .await?
    {
        Some(canceled) => {
            tracing::info!(user_id = user.id, booking_id = canceled.id, "Booking canceled");
            Ok(Json(MessageResponse {
                message: "Booking canceled".to_string(),
                data: canceled,
            }))
        }
        None => {
            // Lost the race or already decided; report the current state.
            let current = BookingRepo::find_for_user(&state.pool, id, user.id)
                .await?
                .map(|b| b.status)
                .unwrap_or_else(|| booking.status.clone());
            Err(AppError::Core(CoreError::Conflict(format!(
                "Booking is already {current}"
            ))))
        }
    }
}

/* --------------------------------------------------------------------------
Trainer side
-------------------------------------------------------------------------- */

/// GET /trainer/bookings?status=
///
/// Bookings against the trainer's courses. An unrecognized status value is
/// treated as "no filter", not an error.
pub async fn trainer_bookings(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = booking::parse_status_filter(query.status.as_deref());
    let bookings = BookingRepo::list_for_trainer(&state.pool, trainer.id, filter).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// POST /trainer/bookings/{id}/decide
///
/// Approve or reject a pending booking. The transition is a single
/// optimistic UPDATE, so of two concurrent decisions only the first wins
/// and the second observes the already-terminal state.
pub async fn decide_booking(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecideInput>,
) -> AppResult<impl IntoResponse> {
    booking::validate_decision(&input.decision).map_err(AppError::Core)?;

    let booking = BookingRepo::find_for_trainer(&state.pool, id, trainer.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    match BookingRepo::transition(&state.pool, booking.id, &input.decision).await? {
        Some(decided) => {
            tracing::info!(
                user_id = trainer.id,
                booking_id = decided.id,
                decision = %decided.status,
                "Booking decided"
            );
            Ok(Json(MessageResponse {
                message: format!("Booking {}", decided.status),
                data: decided,
            }))
        }
        None => {
            let current = BookingRepo::find_for_trainer(&state.pool, id, trainer.id)
                .await?
                .map(|b| b.status)
                .unwrap_or_else(|| booking.status.clone());
            Err(AppError::Core(CoreError::Conflict(format!(
                "Booking is already {current}"
            ))))
        }
    }
}

/// DELETE /trainer/bookings/{id}
///
/// Remove a booking against one of the trainer's courses. This is plain
/// removal, not a status transition; any status may be deleted.
pub async fn delete_booking(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BookingRepo::delete_for_trainer(&state.pool, id, trainer.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }));
    }

    tracing::info!(user_id = trainer.id, booking_id = id, "Booking deleted");

    Ok(StatusCode::NO_CONTENT)
}
