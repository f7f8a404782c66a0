//! Handler-level tests for task assignment and the job board.

mod common;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{InMemoryRepo, test_state};
use newsdesk::{
    ApiError, handlers,
    models::{
        ApplicationStatus, CreateJobRequest, CreateTaskRequest, JobApplicationRequest, Role,
        TaskStatus, UpdateApplicationStatusRequest, UpdateTaskStatusRequest,
    },
};
use std::sync::Arc;

fn job_payload() -> CreateJobRequest {
    CreateJobRequest {
        title: "Staff photographer".to_string(),
        description: "Full-time newsroom photographer.".to_string(),
        requirements: "Portfolio required.".to_string(),
        location: "Limerick".to_string(),
        company: "Newsdesk Media".to_string(),
        posted_by: "HR".to_string(),
    }
}

#[tokio::test]
async fn assignee_advances_their_task_but_strangers_cannot() {
    let repo = Arc::new(InMemoryRepo::new());
    let assignee = repo.seed_user(Role::Reporter);
    let other = repo.seed_user(Role::Reporter);
    let task = repo.seed_task(assignee.id);
    let state = test_state(repo.clone());

    // A reporter who is not the assignee is refused, task unchanged.
    let err = handlers::update_task_by_reporter(
        other,
        State(state.clone()),
        Path(task.id),
        Json(UpdateTaskStatusRequest {
            status: TaskStatus::InProgress,
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Authorization(_)));

    let Json(mine) = handlers::get_reporter_tasks(assignee.clone(), State(state.clone()))
        .await
        .unwrap();
    assert_eq!(mine[0].status, TaskStatus::Pending);

    // The assignee advances it.
    let Json(updated) = handlers::update_task_by_reporter(
        assignee,
        State(state),
        Path(task.id),
        Json(UpdateTaskStatusRequest {
            status: TaskStatus::InProgress,
        }),
    )
    .await
    .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn admin_bypasses_the_assignee_check() {
    let repo = Arc::new(InMemoryRepo::new());
    let admin = repo.seed_user(Role::Admin);
    let assignee = repo.seed_user(Role::Reporter);
    let task = repo.seed_task(assignee.id);
    let state = test_state(repo);

    let Json(updated) = handlers::admin_update_task_status(
        admin,
        State(state),
        Path(task.id),
        Json(UpdateTaskStatusRequest {
            status: TaskStatus::Completed,
        }),
    )
    .await
    .unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);
}

#[tokio::test]
async fn task_creation_is_admin_only_and_validates_title() {
    let repo = Arc::new(InMemoryRepo::new());
    let admin = repo.seed_user(Role::Admin);
    let reporter = repo.seed_user(Role::Reporter);
    let state = test_state(repo);

    let payload = CreateTaskRequest {
        title: String::new(),
        description: None,
        assigned_to: reporter.id,
    };
    let err = handlers::create_task(admin.clone(), State(state.clone()), Json(payload))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let payload = CreateTaskRequest {
        title: "Interview the mayor".to_string(),
        description: Some("Before Friday.".to_string()),
        assigned_to: reporter.id,
    };
    let err = handlers::create_task(reporter.clone(), State(state.clone()), Json(payload.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authorization(_)));

    let (status, Json(task)) = handlers::create_task(admin, State(state), Json(payload))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.assigned_to, reporter.id);
}

#[tokio::test]
async fn reporters_see_only_their_own_tasks() {
    let repo = Arc::new(InMemoryRepo::new());
    let first = repo.seed_user(Role::Reporter);
    let second = repo.seed_user(Role::Reporter);
    repo.seed_task(first.id);
    repo.seed_task(first.id);
    repo.seed_task(second.id);
    let state = test_state(repo);

    let Json(tasks) = handlers::get_reporter_tasks(first.clone(), State(state))
        .await
        .unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.assigned_to == first.id));
}

#[tokio::test]
async fn job_postings_require_every_field() {
    let repo = Arc::new(InMemoryRepo::new());
    let admin = repo.seed_user(Role::Admin);
    let state = test_state(repo);

    let mut incomplete = job_payload();
    incomplete.company = String::new();
    let err = handlers::create_job(admin.clone(), State(state.clone()), Json(incomplete))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let (status, Json(job)) = handlers::create_job(admin, State(state.clone()), Json(job_payload()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    // The board is public.
    let Json(jobs) = handlers::list_jobs(State(state)).await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, job.id);
}

#[tokio::test]
async fn application_accepts_link_or_uploaded_resume_but_not_neither() {
    let repo = Arc::new(InMemoryRepo::new());
    let admin = repo.seed_user(Role::Admin);
    let applicant = repo.seed_user(Role::User);
    let state = test_state(repo);

    let (_, Json(job)) = handlers::create_job(admin.clone(), State(state.clone()), Json(job_payload()))
        .await
        .unwrap();

    let payload = JobApplicationRequest {
        applicant_name: "Dana Scully".to_string(),
        applicant_email: "dana@example.com".to_string(),
        resume: None,
        resume_key: None,
    };
    let err = handlers::apply_for_job(
        applicant.clone(),
        State(state.clone()),
        Path(job.id),
        Json(payload),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    // An uploaded object key takes precedence over a link.
    let payload = JobApplicationRequest {
        applicant_name: "Dana Scully".to_string(),
        applicant_email: "dana@example.com".to_string(),
        resume: Some("https://example.com/cv.pdf".to_string()),
        resume_key: Some("uploads/cv.pdf".to_string()),
    };
    let (status, Json(application)) = handlers::apply_for_job(
        applicant,
        State(state.clone()),
        Path(job.id),
        Json(payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.resume, "uploads/cv.pdf");

    // Admin review moves it to Approved (capitalised vocabulary).
    let Json(reviewed) = handlers::update_application_status(
        admin,
        State(state),
        Path(application.id),
        Json(UpdateApplicationStatusRequest {
            status: ApplicationStatus::Approved,
        }),
    )
    .await
    .unwrap();
    assert_eq!(reviewed.status, ApplicationStatus::Approved);
}
