use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

/// Admin Router Module
///
/// Moderation and management endpoints, nested under `/admin`. Every
/// handler evaluates the admin capability through the policy gate before
/// acting, so an authenticated non-admin receives 403 uniformly.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/stats
        // Dashboard counters, including the pending-moderation backlog.
        .route("/stats", get(handlers::get_admin_stats))
        // GET /admin/users
        .route("/users", get(handlers::list_users))
        // --- News moderation ---
        // GET /admin/news
        // The full moderation queue: pending, approved and rejected items.
        .route("/news", get(handlers::admin_list_news))
        // PUT/DELETE /admin/news/{id}
        // Edit or remove an item at any status.
        .route(
            "/news/{id}",
            put(handlers::update_news).delete(handlers::delete_news),
        )
        // PATCH /admin/news/{id}/approve | /reject
        // The two moderation transitions. Approve clears the rejection
        // reason; reject demands a non-empty one.
        .route("/news/{id}/approve", patch(handlers::approve_news))
        .route("/news/{id}/reject", patch(handlers::reject_news))
        // --- Role elevation ---
        .route("/reporter-requests", get(handlers::list_reporter_requests))
        .route(
            "/reporter-requests/{id}/approve",
            patch(handlers::approve_reporter_request),
        )
        .route(
            "/reporter-requests/{id}/reject",
            patch(handlers::reject_reporter_request),
        )
        .route(
            "/reporter-requests/{id}",
            delete(handlers::delete_reporter_request),
        )
        // --- Task management ---
        .route(
            "/tasks",
            post(handlers::create_task).get(handlers::list_tasks),
        )
        .route(
            "/tasks/{id}",
            put(handlers::admin_update_task_status).delete(handlers::delete_task),
        )
        // --- Job board management ---
        .route("/jobs", post(handlers::create_job))
        .route(
            "/jobs/{id}",
            put(handlers::update_job).delete(handlers::delete_job),
        )
        .route("/applications", get(handlers::list_applications))
        .route(
            "/applications/{id}",
            put(handlers::update_application_status).delete(handlers::delete_application),
        )
        // --- Contact inbox ---
        .route("/messages", get(handlers::list_contact_messages))
        .route("/messages/{id}", delete(handlers::delete_contact_message))
        // --- Site configuration ---
        .route("/site-config", put(handlers::update_site_config))
}
