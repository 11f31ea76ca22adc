//! Trainer application workflow handlers.
//!
//! Submission is gated on the applicant's latest application (resubmission
//! is possible only after a rejection). Review is admin-only; approving an
//! application promotes the applicant's role as an explicit post-transition
//! step in this module, not via a persistence hook.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pawclass_core::application::{self, STATUS_APPROVED};
use pawclass_core::error::CoreError;
use pawclass_core::types::DbId;
use pawclass_db::models::application::{CreateApplication, TrainerApplication, TrainerCertificate};
use pawclass_db::repositories::{ApplicationRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireUser};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for the admin application list.
#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
}

/// Request body for a single review decision.
#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    pub decision: String,
}

/// Request body for a bulk review action.
#[derive(Debug, Deserialize)]
pub struct BulkReviewInput {
    pub ids: Vec<DbId>,
    pub decision: String,
    /// When true (the default), applications already in the target state
    /// get their reviewer/timestamp refreshed instead of being skipped.
    #[serde(default = "default_refresh_reviewed")]
    pub refresh_reviewed: bool,
}

fn default_refresh_reviewed() -> bool {
    true
}

/// Outcome counts for a bulk review action.
#[derive(Debug, Serialize)]
pub struct BulkReviewOutcome {
    pub transitioned: usize,
    pub refreshed: usize,
    pub skipped: usize,
}

/// An application together with its attached certificates.
#[derive(Debug, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: TrainerApplication,
    pub certificates: Vec<TrainerCertificate>,
}

/* --------------------------------------------------------------------------
Applicant side
-------------------------------------------------------------------------- */

/// Parse the multipart submission into the application DTO plus at most one
/// certificate file.
async fn parse_submission(
    mut multipart: Multipart,
) -> Result<(CreateApplication, Option<(String, Vec<u8>)>), AppError> {
    let mut input = CreateApplication::default();
    let mut certificate: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "certificate" => {
                let filename = field.file_name().unwrap_or("certificate").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                if !bytes.is_empty() {
                    certificate = Some((filename, bytes.to_vec()));
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read field: {e}")))?;
                match name.as_str() {
                    "full_name" => input.full_name = value,
                    "age" => {
                        if !value.is_empty() {
                            input.age = Some(value.parse().map_err(|_| {
                                AppError::Core(CoreError::Validation(
                                    "Age must be a whole number".into(),
                                ))
                            })?);
                        }
                    }
                    "gender" => input.gender = value,
                    "phone" => input.phone = value,
                    "email_snapshot" => input.email_snapshot = Some(value),
                    "intro" => input.intro = Some(value),
                    "portfolio_link" => input.portfolio_link = Some(value),
                    _ => {}
                }
            }
        }
    }

    Ok((input, certificate))
}

/// POST /trainer/apply
///
/// Submit a trainer application (multipart: personal fields plus an
/// optional single certificate file).
pub async fn submit_application(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let latest = ApplicationRepo::latest_for_user(&state.pool, user.id).await?;
    application::check_can_submit(latest.as_ref().map(|a| a.status.as_str()))
        .map_err(AppError::Core)?;

    let (input, certificate) = parse_submission(multipart).await?;

    let email_snapshot = input
        .email_snapshot
        .clone()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| user.email.clone());

    let app = ApplicationRepo::create(&state.pool, user.id, &input, &email_snapshot).await?;

    let mut certificates = Vec::new();
    if let Some((filename, bytes)) = certificate {
        let path = state
            .files
            .save(&format!("trainer_certs/app_{}", app.id), &filename, &bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store certificate: {e}")))?;
        certificates.push(ApplicationRepo::attach_certificate(&state.pool, app.id, &path).await?);
    }

    tracing::info!(
        user_id = user.id,
        application_id = app.id,
        has_certificate = !certificates.is_empty(),
        "Trainer application submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Application submitted, awaiting review".to_string(),
            data: ApplicationView {
                application: app,
                certificates,
            },
        }),
    ))
}

/// GET /trainer/apply/latest
///
/// The caller's most recent application (drives the resubmission UI).
pub async fn my_latest_application(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let latest = ApplicationRepo::latest_for_user(&state.pool, user.id).await?;
    let view = match latest {
        Some(app) => {
            let certificates = ApplicationRepo::certificates_for(&state.pool, app.id).await?;
            Some(ApplicationView {
                application: app,
                certificates,
            })
        }
        None => None,
    };
    Ok(Json(DataResponse { data: view }))
}

/* --------------------------------------------------------------------------
Admin side
-------------------------------------------------------------------------- */

/// GET /admin/applications?status=
///
/// All applications, newest first; an unrecognized status value means no
/// filter.
pub async fn list_applications(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = query
        .status
        .as_deref()
        .and_then(|s| application::VALID_STATUSES.iter().copied().find(|v| *v == s));
    let applications = ApplicationRepo::list(&state.pool, filter).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// Run the approval side effect: upgrade the applicant to trainer.
///
/// Invoked right after the status change is persisted. The underlying
/// UPDATE is guarded on the current role, so repeating it never promotes
/// twice.
async fn apply_promotion(state: &AppState, app: &TrainerApplication) -> AppResult<()> {
    let promoted = UserRepo::promote_to_trainer(&state.pool, app.user_id).await?;
    if promoted {
        tracing::info!(
            user_id = app.user_id,
            application_id = app.id,
            "Applicant promoted to trainer"
        );
    }
    Ok(())
}

/// POST /admin/applications/{id}/review
///
/// Apply a single approve/reject decision to a pending application.
/// Repeating the decision an application already carries is a no-op;
/// crossing terminal states conflicts.
pub async fn review_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewInput>,
) -> AppResult<impl IntoResponse> {
    application::validate_decision(&input.decision).map_err(AppError::Core)?;

    let app = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainerApplication",
            id,
        }))?;

    // Idempotent repeat of the same decision.
    if app.status == input.decision {
        return Ok(Json(MessageResponse {
            message: format!("Application already {}", app.status),
            data: app,
        }));
    }

    match ApplicationRepo::review(&state.pool, id, &input.decision, admin.id).await? {
        Some(reviewed) => {
            if reviewed.status == STATUS_APPROVED {
                apply_promotion(&state, &reviewed).await?;
            }

            tracing::info!(
                user_id = admin.id,
                application_id = reviewed.id,
                decision = %reviewed.status,
                "Application reviewed"
            );

            Ok(Json(MessageResponse {
                message: format!("Application {}", reviewed.status),
                data: reviewed,
            }))
        }
        // Not pending anymore and not the same decision: terminal conflict.
        None => Err(AppError::Core(CoreError::Conflict(format!(
            "Application is already {}",
            app.status
        )))),
    }
}

/// POST /admin/applications/bulk-review
///
/// Apply one decision across many applications. Pending rows transition;
/// rows already in the target state refresh their reviewer fields (when
/// `refresh_reviewed` is set); rows in the other terminal state are
/// skipped and counted.
pub async fn bulk_review_applications(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<BulkReviewInput>,
) -> AppResult<impl IntoResponse> {
    application::validate_decision(&input.decision).map_err(AppError::Core)?;

    let mut outcome = BulkReviewOutcome {
        transitioned: 0,
        refreshed: 0,
        skipped: 0,
    };

    for id in &input.ids {
        match ApplicationRepo::review(&state.pool, *id, &input.decision, admin.id).await? {
            Some(reviewed) => {
                if reviewed.status == STATUS_APPROVED {
                    apply_promotion(&state, &reviewed).await?;
                }
                outcome.transitioned += 1;
            }
            None => {
                let refreshed = if input.refresh_reviewed {
                    ApplicationRepo::refresh_review(&state.pool, *id, &input.decision, admin.id)
                        .await?
                        .is_some()
                } else {
                    false
                };
                if refreshed {
                    outcome.refreshed += 1;
                } else {
                    outcome.skipped += 1;
                }
            }
        }
    }

    tracing::info!(
        user_id = admin.id,
        decision = %input.decision,
        transitioned = outcome.transitioned,
        refreshed = outcome.refreshed,
        skipped = outcome.skipped,
        "Bulk review applied"
    );

    Ok(Json(MessageResponse {
        message: format!(
            "{} application(s) {}",
            outcome.transitioned, input.decision
        ),
        data: outcome,
    }))
}
