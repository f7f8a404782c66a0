use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Reporter Router Module
///
/// The submission workflow. All routes require authentication (layered
/// above) plus the reporter-or-admin capability, which the handlers check
/// through the policy gate.
pub fn reporter_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // POST /news
        // Submits an item. Initial status: pending, or approved when the
        // author is an admin.
        .route("/news", post(handlers::create_news))
        // GET /news/my-submissions
        // The caller's submissions in every status, rejection reasons
        // included.
        .route("/news/my-submissions", get(handlers::get_my_submissions))
        // GET /reporter/tasks
        // Only tasks assigned to the caller.
        .route("/reporter/tasks", get(handlers::get_reporter_tasks))
        // PUT /reporter/tasks/{id}
        // Status advance, allowed only for the assignee (or an admin).
        .route("/reporter/tasks/{id}", put(handlers::update_task_by_reporter))
}
