//! Liveness endpoint, mounted at the router root.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match pawclass_db::health_check(&state.pool).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
