use crate::{
    AppState,
    auth::{AuthUser, OptionalAuthUser},
    error::ApiError,
    models::{
        Comment, CreateCommentRequest, CreateNewsRequest, NewsItem, RejectNewsRequest,
        UpdateNewsRequest,
    },
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

/// NewsFilter
///
/// Query parameters for the public news listing.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NewsFilter {
    /// Optional category filter (e.g. "Sports").
    pub category: Option<String>,
}

/// create_news
///
/// [Reporter Route] Submits a news item. The initial status comes from the
/// moderation module: `approved` for admin authors, `pending` otherwise.
#[utoipa::path(
    post,
    path = "/news",
    request_body = CreateNewsRequest,
    responses(
        (status = 201, description = "Submitted", body = NewsItem),
        (status = 400, description = "Missing title or description"),
        (status = 403, description = "Not a reporter")
    )
)]
pub async fn create_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsItem>), ApiError> {
    policy::require(&auth, Capability::ReporterOrAdmin)?;

    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(ApiError::validation("Title and description are required."));
    }

    let status = moderation::initial_news_status(&auth);
    let item = state
        .repo
        .create_news(payload, auth.id, status)
        .await
        .ok_or_else(|| ApiError::internal("Failed to create news item"))?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// list_news
///
/// [Public Route] Lists approved items, newest first, optionally filtered
/// by category. The approved-only restriction is unconditional in the
/// repository query.
#[utoipa::path(
    get,
    path = "/news",
    params(NewsFilter),
    responses((status = 200, description = "Approved news", body = [NewsItem]))
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(filter): Query<NewsFilter>,
) -> Json<Vec<NewsItem>> {
    Json(state.repo.list_approved_news(filter.category).await)
}

/// get_news_by_id
///
/// [Public Route] Single-item detail, visibility-gated: an approved item is
/// served to anyone; a pending or rejected item only to its author or an
/// admin. An invalid credential on this route falls back to anonymous
/// access rather than failing.
#[utoipa::path(
    get,
    path = "/news/{id}",
    params(("id" = Uuid, Path, description = "News item ID")),
    responses(
        (status = 200, description = "Found", body = NewsItem),
        (status = 403, description = "Not visible to caller"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_news_by_id(
    OptionalAuthUser(caller): OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsItem>, ApiError> {
    let item = state
        .repo
        .get_news(id)
        .await
        .ok_or_else(|| ApiError::not_found("News item not found."))?;

    if !policy::can_view_news(&item, caller.as_ref()) {
        return Err(ApiError::authorization(
            "You don't have permission to view this news item.",
        ));
    }

    Ok(Json(item))
}

/// get_my_submissions
///
/// [Reporter Route] Lists the caller's own submissions in every status,
/// including pending and rejected ones.
#[utoipa::path(
    get,
    path = "/news/my-submissions",
    responses((status = 200, description = "My submissions", body = [NewsItem]))
)]
pub async fn get_my_submissions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    policy::require(&auth, Capability::ReporterOrAdmin)?;
    Ok(Json(state.repo.list_news_by_author(auth.id).await))
}

/// admin_list_news
///
/// [Admin Route] Every item regardless of status, for the moderation queue.
#[utoipa::path(
    get,
    path = "/admin/news",
    responses((status = 200, description = "All news", body = [NewsItem]))
)]
pub async fn admin_list_news(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.list_all_news().await))
}

/// update_news
///
/// [Admin Route] Edits text and media of an item at any status. Title and
/// description stay mandatory on every update; media keys replace stored
/// values only when provided.
#[utoipa::path(
    put,
    path = "/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News item ID")),
    request_body = UpdateNewsRequest,
    responses(
        (status = 200, description = "Updated", body = NewsItem),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNewsRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(ApiError::validation("Title and description are required."));
    }

    let item = state
        .repo
        .update_news(id, payload)
        .await
        .ok_or_else(|| ApiError::not_found("News item not found."))?;

    Ok(Json(item))
}

/// delete_news
///
/// [Admin Route] Removes an item at any status.
#[utoipa::path(
    delete,
    path = "/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News item ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if state.repo.delete_news(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("News item not found."))
    }
}

/// approve_news
///
/// [Admin Route] The approve transition: legal from any prior state,
/// idempotent, and always clears the rejection reason.
#[utoipa::path(
    patch,
    path = "/admin/news/{id}/approve",
    params(("id" = Uuid, Path, description = "News item ID")),
    responses(
        (status = 200, description = "Approved", body = NewsItem),
        (status = 404, description = "Not found")
    )
)]
pub async fn approve_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsItem>, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    let mut item = state
        .repo
        .get_news(id)
        .await
        .ok_or_else(|| ApiError::not_found("News item not found."))?;

    moderation::approve(&mut item);

    let item = state
        .repo
        .set_news_status(id, item.status, item.rejection_reason)
        .await
        .ok_or_else(|| ApiError::not_found("News item not found."))?;

    Ok(Json(item))
}

/// reject_news
///
/// [Admin Route] The reject transition: requires a non-empty reason, legal
/// from any prior state. A validation failure leaves the item untouched.
#[utoipa::path(
    patch,
    path = "/admin/news/{id}/reject",
    params(("id" = Uuid, Path, description = "News item ID")),
    request_body = RejectNewsRequest,
    responses(
        (status = 200, description = "Rejected", body = NewsItem),
        (status = 400, description = "Missing rejection reason"),
        (status = 404, description = "Not found")
    )
)]
pub async fn reject_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectNewsRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    let mut item = state
        .repo
        .get_news(id)
        .await
        .ok_or_else(|| ApiError::not_found("News item not found."))?;

    moderation::reject(&mut item, &payload.rejection_reason)?;

    let item = state
        .repo
        .set_news_status(id, item.status, item.rejection_reason)
        .await
        .ok_or_else(|| ApiError::not_found("News item not found."))?;

    Ok(Json(item))
}

/// add_comment
///
/// [Authenticated Route] Posts a comment on an existing news item.
#[utoipa::path(
    post,
    path = "/news/{id}/comments",
    params(("id" = Uuid, Path, description = "News item ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = Comment),
        (status = 400, description = "Missing text"),
        (status = 404, description = "News not found")
    )
)]
pub async fn add_comment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(news_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::validation("Comment text is required"));
    }

    state
        .repo
        .get_news(news_id)
        .await
        .ok_or_else(|| ApiError::not_found("News not found"))?;

    let comment = state
        .repo
        .add_comment(news_id, user_id, payload.text)
        .await
        .ok_or_else(|| ApiError::internal("Failed to add comment"))?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// get_comments
///
/// [Public Route] Lists comments for a news item, newest first.
#[utoipa::path(
    get,
    path = "/news/{id}/comments",
    params(("id" = Uuid, Path, description = "News item ID")),
    responses((status = 200, description = "Comments", body = [Comment]))
)]
pub async fn get_comments(
    State(state): State<AppState>,
    Path(news_id): Path<Uuid>,
) -> Json<Vec<Comment>> {
    Json(state.repo.get_comments(news_id).await)
}
