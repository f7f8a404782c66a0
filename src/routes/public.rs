use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints accessible without a credential. The news detail route
/// accepts an optional token so authors and admins can see their own
/// unapproved items; everything else serves only approved or inherently
/// public data.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Monitoring endpoint; returns "ok" with no side effects.
        .route("/health", get(|| async { "ok" }))
        // POST /register, POST /login
        // Account creation and session issuance.
        .route("/register", post(handlers::register_user))
        .route("/login", post(handlers::login_user))
        // GET /news?category=...
        // Approved items only; the restriction is unconditional in the
        // repository query.
        .route("/news", get(handlers::list_news))
        // GET /news/{id}
        // Visibility-gated detail view. Invalid optional credentials fall
        // back to anonymous access.
        .route("/news/{id}", get(handlers::get_news_by_id))
        // GET /news/{id}/comments
        .route("/news/{id}/comments", get(handlers::get_comments))
        // GET /jobs
        // The public job board.
        .route("/jobs", get(handlers::list_jobs))
        // GET /categories
        .route("/categories", get(handlers::get_categories))
        // GET /site-config
        // Landing-page hero configuration.
        .route("/site-config", get(handlers::get_site_config))
        // POST /contact
        // Contact form submissions, stored for the admin inbox.
        .route("/contact", post(handlers::submit_contact_message))
}
