//! Course catalog handlers: public browsing plus trainer-side CRUD.
//!
//! Rounds are edited only through the parent course's create/update
//! payload; the repository applies the replace-set in one transaction so a
//! failed row never leaves the course and its rounds out of step.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pawclass_core::error::CoreError;
use pawclass_core::schedule::validate_round;
use pawclass_core::types::DbId;
use pawclass_db::models::course::{
    Course, CourseDetail, CreateCourse, RoundInput, UpdateCourse,
};
use pawclass_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireTrainer;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Validate and normalize submitted rounds: days sorted and deduplicated,
/// time-range rule enforced.
fn validate_rounds(rounds: &[RoundInput]) -> Result<Vec<RoundInput>, CoreError> {
    rounds
        .iter()
        .map(|round| {
            let schedule = validate_round(&round.days, round.start_time, round.end_time)?;
            Ok(RoundInput {
                id: round.id,
                days: schedule.days,
                start_time: schedule.start_time,
                end_time: schedule.end_time,
            })
        })
        .collect()
}

/// Validate the course's own scalar invariants.
fn validate_course_fields(duration_hr: Option<i32>, max_dogs: Option<i32>) -> Result<(), CoreError> {
    if let Some(duration) = duration_hr {
        if duration < 1 {
            return Err(CoreError::Validation(
                "Course duration must be at least 1 hour".into(),
            ));
        }
    }
    if let Some(max) = max_dogs {
        if max < 1 {
            return Err(CoreError::Validation(
                "Max dogs must be at least 1 when set".into(),
            ));
        }
    }
    Ok(())
}

/// Assemble the response view for a course and its rounds.
async fn course_detail(state: &AppState, course: Course) -> AppResult<CourseDetail> {
    let rounds = CourseRepo::rounds_for_course(&state.pool, course.id).await?;
    Ok(CourseDetail::new(course, rounds))
}

/* --------------------------------------------------------------------------
Public catalog
-------------------------------------------------------------------------- */

/// GET /courses
///
/// Publicly visible courses, newest first. A course appears only while it
/// is published AND its owner currently holds the trainer role.
pub async fn list_courses(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /courses/{id}
///
/// Public course detail with derived display data (sorted day labels,
/// cleaned benefits list). Unpublished or demoted-owner courses 404.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = CourseRepo::find_published(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let detail = course_detail(&state, course).await?;
    Ok(Json(DataResponse { data: detail }))
}

/* --------------------------------------------------------------------------
Trainer CRUD
-------------------------------------------------------------------------- */

/// GET /trainer/courses
///
/// The trainer's own courses (published or not), newest first.
pub async fn trainer_list_courses(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_for_trainer(&state.pool, trainer.id).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /trainer/courses
///
/// Create a course together with its initial rounds.
pub async fn create_course(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    validate_course_fields(Some(input.duration_hr), input.max_dogs).map_err(AppError::Core)?;
    let rounds = validate_rounds(&input.rounds).map_err(AppError::Core)?;

    let course = CourseRepo::create_with_rounds(&state.pool, trainer.id, &input, &rounds).await?;

    tracing::info!(
        user_id = trainer.id,
        course_id = course.id,
        rounds = rounds.len(),
        "Course created"
    );

    let detail = course_detail(&state, course).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Course created".to_string(),
            data: detail,
        }),
    ))
}

/// PUT /trainer/courses/{id}
///
/// Update a course; when `rounds` is present it is the full replace-set
/// (stored rounds not resubmitted are deleted).
pub async fn update_course(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    validate_course_fields(input.duration_hr, input.max_dogs).map_err(AppError::Core)?;

    let rounds = match &input.rounds {
        Some(submitted) => {
            let normalized = validate_rounds(submitted).map_err(AppError::Core)?;

            // Submitted ids must address this course's own stored rounds.
            let stored = CourseRepo::rounds_for_course(&state.pool, id).await?;
            for round_id in normalized.iter().filter_map(|r| r.id) {
                if !stored.iter().any(|r| r.id == round_id) {
                    return Err(AppError::Core(CoreError::Validation(format!(
                        "Round {round_id} does not belong to this course"
                    ))));
                }
            }
            Some(normalized)
        }
        None => None,
    };

    let course = CourseRepo::update_with_rounds(&state.pool, id, trainer.id, &input, rounds.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    tracing::info!(user_id = trainer.id, course_id = course.id, "Course updated");

    let detail = course_detail(&state, course).await?;
    Ok(Json(MessageResponse {
        message: "Course updated".to_string(),
        data: detail,
    }))
}

/// DELETE /trainer/courses/{id}
///
/// Delete a course; its rounds and bookings cascade away with it.
pub async fn delete_course(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CourseRepo::delete(&state.pool, id, trainer.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }

    tracing::info!(user_id = trainer.id, course_id = id, "Course deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /trainer/courses/{id}/publish
pub async fn publish_course(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_published(state, trainer.id, id, true).await
}

/// POST /trainer/courses/{id}/unpublish
pub async fn unpublish_course(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_published(state, trainer.id, id, false).await
}

async fn set_published(
    state: AppState,
    trainer_id: DbId,
    id: DbId,
    published: bool,
) -> AppResult<Json<MessageResponse<Course>>> {
    let course = CourseRepo::set_published(&state.pool, id, trainer_id, published)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    tracing::info!(
        user_id = trainer_id,
        course_id = course.id,
        published,
        "Course visibility changed"
    );

    Ok(Json(MessageResponse {
        message: if published {
            "Course published".to_string()
        } else {
            "Course unpublished".to_string()
        },
        data: course,
    }))
}

/// POST /trainer/courses/{id}/cover
///
/// Multipart upload of the course cover image. The blob is handed to the
/// file storage layer and the returned reference path stored on the course.
pub async fn upload_cover(
    RequireTrainer(trainer): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    // Confirm ownership before accepting the upload.
    CourseRepo::find_for_trainer(&state.pool, id, trainer.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("cover_image") {
            let filename = field.file_name().unwrap_or("cover").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "A cover_image file field is required".into(),
        ))
    })?;
    if bytes.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded cover image is empty".into(),
        )));
    }

    let path = state
        .files
        .save(&format!("courses/{}", trainer.id), &filename, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let course = CourseRepo::set_cover_image(&state.pool, id, trainer.id, &path)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    tracing::info!(user_id = trainer.id, course_id = id, path = %path, "Cover image stored");

    Ok(Json(MessageResponse {
        message: "Cover image uploaded".to_string(),
        data: course,
    }))
}
