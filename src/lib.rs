use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod moderation;
pub mod policy;
pub mod repository;
pub mod storage;

// Routing segregated by access class (Public, Authenticated, Reporter, Admin).
pub mod routes;
use auth::AuthUser;
use routes::{admin, authenticated, public, reporter};

// --- Public Re-exports ---

// Core state types for the application entry point and tests.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{PostgresRepository, RepositoryState};
pub use storage::{MockStorageService, S3StorageClient, StorageState};

/// ApiDoc
///
/// Aggregates every annotated handler and schema into the OpenAPI document
/// served at `/api-docs/openapi.json` (browsable at `/swagger-ui`).
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::register_user, handlers::login_user, handlers::get_profile,
        handlers::list_users,
        handlers::create_news, handlers::list_news, handlers::get_news_by_id,
        handlers::get_my_submissions, handlers::admin_list_news, handlers::update_news,
        handlers::delete_news, handlers::approve_news, handlers::reject_news,
        handlers::add_comment, handlers::get_comments,
        handlers::apply_for_reporter, handlers::list_reporter_requests,
        handlers::approve_reporter_request, handlers::reject_reporter_request,
        handlers::delete_reporter_request,
        handlers::create_task, handlers::list_tasks, handlers::admin_update_task_status,
        handlers::delete_task, handlers::get_reporter_tasks, handlers::update_task_by_reporter,
        handlers::list_jobs, handlers::create_job, handlers::update_job, handlers::delete_job,
        handlers::apply_for_job, handlers::list_applications,
        handlers::update_application_status, handlers::delete_application,
        handlers::get_categories, handlers::get_presigned_url,
        handlers::submit_contact_message, handlers::list_contact_messages,
        handlers::delete_contact_message, handlers::get_site_config,
        handlers::update_site_config, handlers::get_admin_stats
    ),
    components(
        schemas(
            models::Role, models::NewsStatus, models::RequestStatus, models::TaskStatus,
            models::ApplicationStatus,
            models::User, models::NewsItem, models::ReporterRequest, models::Task,
            models::Job, models::JobApplication, models::Comment, models::ContactMessage,
            models::SiteConfig, models::UserProfile,
            models::RegisterRequest, models::LoginRequest, models::LoginResponse,
            models::CreateNewsRequest, models::UpdateNewsRequest, models::RejectNewsRequest,
            models::ReporterApplication, models::CreateTaskRequest,
            models::UpdateTaskStatusRequest, models::CreateJobRequest,
            models::JobApplicationRequest, models::UpdateApplicationStatusRequest,
            models::CreateCommentRequest, models::ContactRequest,
            models::UpdateSiteConfigRequest, models::PresignedUrlRequest,
            models::PresignedUrlResponse, models::AdminDashboardStats,
            error::ErrorBody,
        )
    ),
    tags(
        (name = "newsdesk", description = "News publishing and moderation API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding all application services,
/// shared across every request.
#[derive(Clone)]
pub struct AppState {
    /// Persistence, behind the `Repository` trait.
    pub repo: RepositoryState,
    /// Object storage for the media upload pipeline.
    pub storage: StorageState,
    /// Immutable environment configuration.
    pub config: AppConfig,
}

// FromRef implementations let extractors pull individual services out of
// the shared state (the AuthUser extractor needs the repository and the
// config without seeing the rest).

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication on the protected route groups. The `AuthUser`
/// extractor rejects the request with 401 before the handler runs; on
/// success the request proceeds unchanged and handlers re-extract the
/// identity they need.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies the authentication layer to the
/// protected groups, and wraps everything in the observability stack
/// (request-id generation, HTTP tracing, request-id propagation, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Serve the generated OpenAPI document and Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes carry no middleware.
        .merge(public::public_routes())
        // Authenticated and reporter routes sit behind the auth layer; the
        // reporter-or-admin capability is checked in the handlers.
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .merge(
            reporter::reporter_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Admin routes are nested under /admin; each handler evaluates the
        // admin capability through the policy gate.
        .nest("/admin", admin::admin_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                // A unique id per request...
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // ...carried by the span wrapping the request lifecycle...
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // ...and echoed back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request tracing span, correlating all log lines of one
/// request through the `x-request-id` header.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
