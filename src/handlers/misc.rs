use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        AdminDashboardStats, ContactMessage, ContactRequest, PresignedUrlRequest,
        PresignedUrlResponse, SiteConfig, UpdateSiteConfigRequest,
    },
    policy::{self, Capability},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// The fixed category vocabulary offered to submitters and readers.
const CATEGORIES: [&str; 7] = [
    "National",
    "International",
    "Business",
    "Sports",
    "Entertainment",
    "Technology",
    "General",
];

/// get_categories
///
/// [Public Route] The category list used by submission forms and the
/// category navigation.
#[utoipa::path(
    get,
    path = "/categories",
    responses((status = 200, description = "Categories", body = [String]))
)]
pub async fn get_categories() -> Json<Vec<&'static str>> {
    Json(CATEGORIES.to_vec())
}

/// get_presigned_url
///
/// [Authenticated Route] Generates a short-lived URL for a direct
/// client-to-bucket upload. The object key is UUID-derived so callers
/// cannot influence where the file lands beyond its extension.
#[utoipa::path(
    post,
    path = "/upload/presigned",
    request_body = PresignedUrlRequest,
    responses(
        (status = 200, description = "URL", body = PresignedUrlResponse),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_presigned_url(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<PresignedUrlRequest>,
) -> Result<Json<PresignedUrlResponse>, ApiError> {
    let extension = std::path::Path::new(&payload.filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("bin");
    let object_key = format!("uploads/{}.{}", Uuid::new_v4(), extension);

    let upload_url = state
        .storage
        .presigned_upload_url(&object_key, &payload.file_type)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(PresignedUrlResponse {
        upload_url,
        resource_key: object_key,
    }))
}

/// submit_contact_message
///
/// [Public Route] The contact form; all fields are required.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactMessage),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn submit_contact_message(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), ApiError> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.message.trim().is_empty()
    {
        return Err(ApiError::validation("All fields are required."));
    }

    let message = state
        .repo
        .create_message(payload)
        .await
        .ok_or_else(|| ApiError::internal("Failed to store message"))?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// list_contact_messages
///
/// [Admin Route] The contact inbox, newest first.
#[utoipa::path(
    get,
    path = "/admin/messages",
    responses((status = 200, description = "Messages", body = [ContactMessage]))
)]
pub async fn list_contact_messages(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.list_messages().await))
}

/// delete_contact_message
///
/// [Admin Route] Removes a message from the inbox.
#[utoipa::path(
    delete,
    path = "/admin/messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn delete_contact_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if state.repo.delete_message(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Message not found."))
    }
}

/// get_site_config
///
/// [Public Route] The landing-page hero configuration; created with
/// defaults on first read.
#[utoipa::path(
    get,
    path = "/site-config",
    responses((status = 200, description = "Site config", body = SiteConfig))
)]
pub async fn get_site_config(State(state): State<AppState>) -> Json<SiteConfig> {
    Json(state.repo.get_site_config().await)
}

/// update_site_config
///
/// [Admin Route] Partial update of the hero section; a new hero image is
/// referenced by the object key from the presigned upload flow.
#[utoipa::path(
    put,
    path = "/admin/site-config",
    request_body = UpdateSiteConfigRequest,
    responses((status = 200, description = "Updated", body = SiteConfig))
)]
pub async fn update_site_config(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateSiteConfigRequest>,
) -> Result<Json<SiteConfig>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.update_site_config(payload).await))
}

/// get_admin_stats
///
/// [Admin Route] Dashboard counters, including the moderation backlog.
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses((status = 200, description = "Stats", body = AdminDashboardStats))
)]
pub async fn get_admin_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardStats>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.get_stats().await))
}
