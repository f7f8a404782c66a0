use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{ReporterApplication, ReporterRequest, RequestStatus},
    moderation,
    policy::{self, Capability},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

/// RequestFilter
///
/// Query parameters for the admin review queue.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct RequestFilter {
    /// Optional status filter, e.g. `?status=pending`.
    pub status: Option<RequestStatus>,
}

/// apply_for_reporter
///
/// [Authenticated Route] Submits a reporter request. The role-elevation
/// state machine enforces the preconditions: only `user`-role accounts may
/// apply, at most one request exists per user (with a status-specific
/// conflict message), and the phone number is mandatory. A previously
/// rejected applicant stays blocked.
#[utoipa::path(
    post,
    path = "/apply-reporter",
    request_body = ReporterApplication,
    responses(
        (status = 201, description = "Request submitted", body = ReporterRequest),
        (status = 400, description = "Invalid input or wrong role"),
        (status = 409, description = "A request already exists for this user")
    )
)]
pub async fn apply_for_reporter(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ReporterApplication>,
) -> Result<(StatusCode, Json<ReporterRequest>), ApiError> {
    let existing = state.repo.get_request_for_user(auth.id).await;
    moderation::check_reporter_application(&auth, existing.as_ref(), &payload)?;

    let request = state
        .repo
        .create_reporter_request(auth.id, payload)
        .await
        .ok_or_else(|| ApiError::internal("Failed to submit reporter request"))?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// list_reporter_requests
///
/// [Admin Route] The review queue, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/admin/reporter-requests",
    params(RequestFilter),
    responses((status = 200, description = "Requests", body = [ReporterRequest]))
)]
pub async fn list_reporter_requests(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<RequestFilter>,
) -> Result<Json<Vec<ReporterRequest>>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.list_reporter_requests(filter.status).await))
}

/// approve_reporter_request
///
/// [Admin Route] The approval transition: grants the reporter role and
/// marks the request approved. Both writes happen in one repository
/// transaction, so the role and the request status cannot diverge.
#[utoipa::path(
    patch,
    path = "/admin/reporter-requests/{id}/approve",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Approved; user is now a reporter", body = ReporterRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn approve_reporter_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReporterRequest>, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    let request = state
        .repo
        .approve_reporter_request(id)
        .await
        .ok_or_else(|| ApiError::not_found("Request not found."))?;

    Ok(Json(request))
}

/// reject_reporter_request
///
/// [Admin Route] The rejection transition; the applicant's role is left
/// unchanged.
#[utoipa::path(
    patch,
    path = "/admin/reporter-requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Rejected", body = ReporterRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn reject_reporter_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReporterRequest>, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    let request = state
        .repo
        .reject_reporter_request(id)
        .await
        .ok_or_else(|| ApiError::not_found("Request not found."))?;

    Ok(Json(request))
}

/// delete_reporter_request
///
/// [Admin Route] Removes a request record at any status.
#[utoipa::path(
    delete,
    path = "/admin/reporter-requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn delete_reporter_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if state.repo.delete_reporter_request(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Request not found."))
    }
}
