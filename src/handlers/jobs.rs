use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        CreateJobRequest, Job, JobApplication, JobApplicationRequest,
        UpdateApplicationStatusRequest,
    },
    policy::{self, Capability},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

fn validate_job(payload: &CreateJobRequest) -> Result<(), ApiError> {
    let all_present = [
        &payload.title,
        &payload.description,
        &payload.requirements,
        &payload.location,
        &payload.company,
        &payload.posted_by,
    ]
    .iter()
    .all(|field| !field.trim().is_empty());

    if all_present {
        Ok(())
    } else {
        Err(ApiError::validation(
            "All fields (title, description, requirements, location, company, posted_by) are required",
        ))
    }
}

/// list_jobs
///
/// [Public Route] The job board, newest first.
#[utoipa::path(
    get,
    path = "/jobs",
    responses((status = 200, description = "Jobs", body = [Job]))
)]
pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.repo.list_jobs().await)
}

/// create_job
///
/// [Admin Route] Adds a posting; every field is required.
#[utoipa::path(
    post,
    path = "/admin/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Created", body = Job),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn create_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    policy::require(&auth, Capability::Admin)?;
    validate_job(&payload)?;

    let job = state
        .repo
        .create_job(payload)
        .await
        .ok_or_else(|| ApiError::internal("Failed to create job"))?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// update_job
///
/// [Admin Route] Replaces a posting's fields; all of them are required.
#[utoipa::path(
    put,
    path = "/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = CreateJobRequest,
    responses(
        (status = 200, description = "Updated", body = Job),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    validate_job(&payload)?;

    let job = state
        .repo
        .update_job(id, payload)
        .await
        .ok_or_else(|| ApiError::not_found("Job not found."))?;

    Ok(Json(job))
}

/// delete_job
///
/// [Admin Route] Removes a posting.
#[utoipa::path(
    delete,
    path = "/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if state.repo.delete_job(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Job not found."))
    }
}

/// apply_for_job
///
/// [Authenticated Route] Submits an application. The resume is either an
/// external link or the object key of a file uploaded through the
/// presigned pipeline; one of the two must be present. New applications
/// start `Pending`.
#[utoipa::path(
    post,
    path = "/jobs/{id}/apply",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = JobApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = JobApplication),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn apply_for_job(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<JobApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplication>), ApiError> {
    let resume_link = payload
        .resume
        .map(|link| link.trim().to_string())
        .unwrap_or_default();
    // An uploaded file takes precedence over a link.
    let resume = payload.resume_key.filter(|key| !key.is_empty()).unwrap_or(resume_link);

    if payload.applicant_name.trim().is_empty()
        || payload.applicant_email.trim().is_empty()
        || resume.is_empty()
    {
        return Err(ApiError::validation(
            "Applicant name, email, and either a resume link or an uploaded resume file are required.",
        ));
    }

    let application = state
        .repo
        .create_application(job_id, payload.applicant_name, payload.applicant_email, resume)
        .await
        .ok_or_else(|| ApiError::internal("Failed to submit application"))?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// list_applications
///
/// [Admin Route] Every application, enriched with the job title.
#[utoipa::path(
    get,
    path = "/admin/applications",
    responses((status = 200, description = "Applications", body = [JobApplication]))
)]
pub async fn list_applications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<JobApplication>>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.list_applications().await))
}

/// update_application_status
///
/// [Admin Route] Sets an application's status (`Pending`/`Approved`/
/// `Rejected`).
#[utoipa::path(
    put,
    path = "/admin/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Updated", body = JobApplication),
        (status = 404, description = "Application not found")
    )
)]
pub async fn update_application_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<JobApplication>, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    let application = state
        .repo
        .set_application_status(id, payload.status)
        .await
        .ok_or_else(|| ApiError::not_found("Application not found."))?;

    Ok(Json(application))
}

/// delete_application
///
/// [Admin Route] Removes an application record.
#[utoipa::path(
    delete,
    path = "/admin/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn delete_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if state.repo.delete_application(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Application not found."))
    }
}
