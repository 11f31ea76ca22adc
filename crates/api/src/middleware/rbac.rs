//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`], loads the caller's user row, and
//! rejects requests whose current role does not meet the requirement. The
//! row is loaded fresh on every request so a trainer promotion (or
//! revocation) takes effect immediately, without waiting for the token to
//! be reissued.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pawclass_core::error::CoreError;
use pawclass_core::roles::Role;
use pawclass_db::models::user::User;
use pawclass_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Load the authenticated caller's user row, or reject with 401 if the
/// token subject no longer exists.
async fn load_user(parts: &mut Parts, state: &AppState) -> Result<User, AppError> {
    let auth = AuthUser::from_request_parts(parts, state).await?;
    UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))
}

/// Requires any authenticated user, with the full user row attached.
///
/// ```ignore
/// async fn my_handler(RequireUser(user): RequireUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequireUser(load_user(parts, state).await?))
    }
}

/// Requires the trainer role. Rejects with 403 Forbidden otherwise.
///
/// The role column is matched exhaustively through the [`Role`] sum type:
/// anything that is not `Role::Trainer` is `Role::None` and is refused.
pub struct RequireTrainer(pub User);

impl FromRequestParts<AppState> for RequireTrainer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = load_user(parts, state).await?;
        match user.role() {
            Role::Trainer => Ok(RequireTrainer(user)),
            Role::None => Err(AppError::Core(CoreError::Forbidden(
                "Trainer role required".into(),
            ))),
        }
    }
}

/// Requires an administrator. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = load_user(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Administrator access required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
