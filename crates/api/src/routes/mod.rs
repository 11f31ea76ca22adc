pub mod health;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/me                                current user
///
/// /courses                                public catalog (GET)
/// /courses/{id}                           public detail (GET)
/// /courses/{id}/bookings                  create booking (POST, auth)
///
/// /trainer/courses                        list, create (trainer only)
/// /trainer/courses/{id}                   update, delete
/// /trainer/courses/{id}/publish           publish (POST)
/// /trainer/courses/{id}/unpublish         unpublish (POST)
/// /trainer/courses/{id}/cover             cover upload (POST, multipart)
///
/// /bookings                               requester history (GET)
/// /bookings/{id}                          requester detail (GET)
/// /bookings/{id}/cancel                   requester cancel (POST)
///
/// /trainer/bookings                       trainer inbox (GET, ?status=)
/// /trainer/bookings/{id}                  delete (DELETE)
/// /trainer/bookings/{id}/decide           approve/reject (POST)
///
/// /trainer/apply                          submit application (POST, multipart)
/// /trainer/apply/latest                   own latest application (GET)
///
/// /admin/applications                     list (GET, ?status=, admin only)
/// /admin/applications/{id}/review         single review (POST)
/// /admin/applications/bulk-review         bulk review (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication.
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        // Public catalog.
        .route("/courses", get(handlers::course::list_courses))
        .route("/courses/{id}", get(handlers::course::get_course))
        .route(
            "/courses/{id}/bookings",
            post(handlers::booking::create_booking),
        )
        // Trainer-side course management.
        .route(
            "/trainer/courses",
            get(handlers::course::trainer_list_courses).post(handlers::course::create_course),
        )
        .route(
            "/trainer/courses/{id}",
            put(handlers::course::update_course).delete(handlers::course::delete_course),
        )
        .route(
            "/trainer/courses/{id}/publish",
            post(handlers::course::publish_course),
        )
        .route(
            "/trainer/courses/{id}/unpublish",
            post(handlers::course::unpublish_course),
        )
        .route(
            "/trainer/courses/{id}/cover",
            post(handlers::course::upload_cover),
        )
        // Requester-side bookings.
        .route("/bookings", get(handlers::booking::my_bookings))
        .route("/bookings/{id}", get(handlers::booking::booking_detail))
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
        // Trainer-side bookings.
        .route("/trainer/bookings", get(handlers::booking::trainer_bookings))
        .route(
            "/trainer/bookings/{id}",
            delete(handlers::booking::delete_booking),
        )
        .route(
            "/trainer/bookings/{id}/decide",
            post(handlers::booking::decide_booking),
        )
        // Trainer applications.
        .route(
            "/trainer/apply",
            post(handlers::application::submit_application),
        )
        .route(
            "/trainer/apply/latest",
            get(handlers::application::my_latest_application),
        )
        // Admin review surface.
        .route(
            "/admin/applications",
            get(handlers::application::list_applications),
        )
        .route(
            "/admin/applications/{id}/review",
            post(handlers::application::review_application),
        )
        .route(
            "/admin/applications/bulk-review",
            post(handlers::application::bulk_review_applications),
        )
}
