//! Handler-level tests for registration, login, and the supporting public
//! surface (contact form, presigned uploads, dashboard, site config).

mod common;

use axum::Json;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::StatusCode;
use common::{InMemoryRepo, test_state};
use newsdesk::{
    ApiError,
    auth::{self, AuthUser, OptionalAuthUser},
    handlers,
    models::{
        ContactRequest, LoginRequest, NewsStatus, PresignedUrlRequest, RegisterRequest, Role,
        UpdateSiteConfigRequest,
    },
};
use std::sync::Arc;
use uuid::Uuid;

fn registration(email: &str) -> RegisterRequest {
    RegisterRequest {
        username: "casey".to_string(),
        email: email.to_string(),
        password: "correct-horse".to_string(),
        role: None,
        bio: None,
    }
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let repo = Arc::new(InMemoryRepo::new());
    let state = test_state(repo);

    let (status, Json(profile)) = handlers::register_user(
        State(state.clone()),
        Json(registration("casey@example.com")),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(profile.role, Role::User);

    let Json(session) = handlers::login_user(
        State(state.clone()),
        Json(LoginRequest {
            email: "casey@example.com".to_string(),
            password: "correct-horse".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(session.user_id, profile.id);
    assert_eq!(session.role, Role::User);
    assert!(!session.token.is_empty());

    // Wrong password is an authentication failure, not a missing user.
    let err = handlers::login_user(
        State(state.clone()),
        Json(LoginRequest {
            email: "casey@example.com".to_string(),
            password: "wrong".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));

    let err = handlers::login_user(
        State(state),
        Json(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "whatever".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn registration_validates_input_and_uniqueness() {
    let repo = Arc::new(InMemoryRepo::new());
    let state = test_state(repo);

    // Short password.
    let mut bad = registration("short@example.com");
    bad.password = "abc".to_string();
    let err = handlers::register_user(State(state.clone()), Json(bad))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    // Self-registering an admin account is refused.
    let mut bad = registration("admin@example.com");
    bad.role = Some(Role::Admin);
    let err = handlers::register_user(State(state.clone()), Json(bad))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    // Duplicate email conflicts.
    handlers::register_user(State(state.clone()), Json(registration("dup@example.com")))
        .await
        .unwrap();
    let err = handlers::register_user(State(state), Json(registration("dup@example.com")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn bearer_token_resolves_identity_and_current_role() {
    let repo = Arc::new(InMemoryRepo::new());
    let user = repo.seed_user(Role::User);
    let state = test_state(repo);

    let token = auth::issue_token(user.id, &state.config).unwrap();
    let (mut parts, _) = axum::http::Request::builder()
        .header("authorization", format!("Bearer {token}"))
        .body(())
        .unwrap()
        .into_parts();

    let resolved = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.role, Role::User);
}

#[tokio::test]
async fn token_for_a_deleted_user_is_rejected() {
    let repo = Arc::new(InMemoryRepo::new());
    let state = test_state(repo);

    // Valid signature, but the subject does not exist any more.
    let token = auth::issue_token(Uuid::new_v4(), &state.config).unwrap();
    let (mut parts, _) = axum::http::Request::builder()
        .header("authorization", format!("Bearer {token}"))
        .body(())
        .unwrap()
        .into_parts();

    let err = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));
}

#[tokio::test]
async fn invalid_optional_credential_falls_back_to_anonymous() {
    let repo = Arc::new(InMemoryRepo::new());
    let author = repo.seed_user(Role::Reporter);
    let item = repo.seed_news(author.id, NewsStatus::Approved, "");
    let state = test_state(repo);

    let (mut parts, _) = axum::http::Request::builder()
        .header("authorization", "Bearer not-a-real-token")
        .body(())
        .unwrap()
        .into_parts();

    let OptionalAuthUser(resolved) = OptionalAuthUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert!(resolved.is_none());

    // The public read still succeeds for the anonymous caller.
    let Json(seen) =
        handlers::get_news_by_id(OptionalAuthUser(None), State(state), Path(item.id))
            .await
            .unwrap();
    assert_eq!(seen.id, item.id);
}

#[tokio::test]
async fn profile_returns_the_callers_own_record() {
    let repo = Arc::new(InMemoryRepo::new());
    let reporter = repo.seed_user(Role::Reporter);
    let state = test_state(repo);

    let Json(profile) = handlers::get_profile(reporter.clone(), State(state))
        .await
        .unwrap();
    assert_eq!(profile.id, reporter.id);
    assert_eq!(profile.role, Role::Reporter);
}

#[tokio::test]
async fn presigned_url_uses_a_generated_object_key() {
    let repo = Arc::new(InMemoryRepo::new());
    let reporter = repo.seed_user(Role::Reporter);
    let state = test_state(repo);

    let Json(response) = handlers::get_presigned_url(
        reporter,
        State(state),
        Json(PresignedUrlRequest {
            filename: "press_photo.jpg".to_string(),
            file_type: "image/jpeg".to_string(),
        }),
    )
    .await
    .unwrap();

    assert!(response.resource_key.starts_with("uploads/"));
    assert!(response.resource_key.ends_with(".jpg"));
    assert!(response.upload_url.contains(&response.resource_key));
}

#[tokio::test]
async fn contact_form_requires_all_fields_and_feeds_the_admin_inbox() {
    let repo = Arc::new(InMemoryRepo::new());
    let admin = repo.seed_user(Role::Admin);
    let user = repo.seed_user(Role::User);
    let state = test_state(repo);

    let err = handlers::submit_contact_message(
        State(state.clone()),
        Json(ContactRequest {
            name: "Reader".to_string(),
            email: String::new(),
            message: "Hello".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let (status, Json(message)) = handlers::submit_contact_message(
        State(state.clone()),
        Json(ContactRequest {
            name: "Reader".to_string(),
            email: "reader@example.com".to_string(),
            message: "Correction on yesterday's story.".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    // Only admins may read or delete the inbox.
    let err = handlers::list_contact_messages(user, State(state.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authorization(_)));

    let Json(inbox) = handlers::list_contact_messages(admin.clone(), State(state.clone()))
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);

    let status = handlers::delete_contact_message(admin, State(state), Path(message.id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn dashboard_counts_the_moderation_backlog() {
    let repo = Arc::new(InMemoryRepo::new());
    let admin = repo.seed_user(Role::Admin);
    let reporter = repo.seed_user(Role::Reporter);
    repo.seed_news(reporter.id, NewsStatus::Pending, "");
    repo.seed_news(reporter.id, NewsStatus::Pending, "");
    repo.seed_news(reporter.id, NewsStatus::Approved, "");
    let state = test_state(repo);

    let Json(stats) = handlers::get_admin_stats(admin, State(state))
        .await
        .unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_news, 3);
    assert_eq!(stats.pending_news, 2);
}

#[tokio::test]
async fn site_config_seeds_defaults_and_updates_partially() {
    let repo = Arc::new(InMemoryRepo::new());
    let admin = repo.seed_user(Role::Admin);
    let state = test_state(repo);

    let Json(config) = handlers::get_site_config(State(state.clone())).await;
    assert_eq!(config.hero_headline, "Top Stories of the Day");

    let Json(updated) = handlers::update_site_config(
        admin,
        State(state.clone()),
        Json(UpdateSiteConfigRequest {
            hero_headline: Some("Election Night Live".to_string()),
            ..UpdateSiteConfigRequest::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(updated.hero_headline, "Election Night Live");
    // Untouched fields keep their values.
    assert_eq!(updated.hero_cta_text, config.hero_cta_text);
}
