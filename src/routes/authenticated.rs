use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Authenticated Router Module
///
/// Routes available to any logged-in account, regardless of role. The
/// `AuthUser` extractor middleware on the layer above guarantees every
/// handler here receives a resolved identity.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /profile
        // The caller's own account record.
        .route("/profile", get(handlers::get_profile))
        // POST /upload/presigned
        // Start of the media pipeline: a short-lived (10-minute) PUT URL
        // for a direct client-to-bucket upload.
        .route("/upload/presigned", post(handlers::get_presigned_url))
        // POST /news/{id}/comments
        .route("/news/{id}/comments", post(handlers::add_comment))
        // POST /jobs/{id}/apply
        // Job application with a resume link or uploaded object key.
        .route("/jobs/{id}/apply", post(handlers::apply_for_job))
        // POST /apply-reporter
        // Entry point of the role-elevation state machine; only
        // `user`-role accounts pass its preconditions.
        .route("/apply-reporter", post(handlers::apply_for_reporter))
}
