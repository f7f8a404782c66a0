use crate::{
    AppState,
    auth::{self, AuthUser},
    error::ApiError,
    models::{LoginRequest, LoginResponse, NewUser, RegisterRequest, Role, UserProfile},
    policy::{self, Capability},
};
use axum::{Json, extract::State, http::StatusCode};

/// register_user
///
/// [Public Route] Creates a new account. The requested role is restricted
/// to `user`/`reporter`; admin accounts are never self-registered. The
/// password is hashed before it reaches the repository and the email must
/// be unique.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = UserProfile),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(ApiError::validation("Please include a valid email"));
    }
    if payload.password.len() < 6 {
        return Err(ApiError::validation("Password must be 6 or more characters"));
    }

    let role = payload.role.unwrap_or(Role::User);
    if role == Role::Admin {
        return Err(ApiError::validation("Invalid role"));
    }

    if state
        .repo
        .find_user_by_email(payload.email.trim())
        .await
        .is_some()
    {
        return Err(ApiError::conflict("Email already exists."));
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let user = state
        .repo
        .create_user(NewUser {
            username: payload.username.trim().to_string(),
            email: payload.email.trim().to_string(),
            password_hash,
            role,
            bio: payload.bio.unwrap_or_default(),
        })
        .await
        .ok_or_else(|| ApiError::internal("Failed to register user"))?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// login_user
///
/// [Public Route] Verifies credentials and issues a one-hour bearer token.
/// An unknown email is distinguished from a wrong password, matching the
/// original API contract.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "User not found")
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .repo
        .find_user_by_email(payload.email.trim())
        .await
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::authentication("Invalid credentials."));
    }

    let token = auth::issue_token(user.id, &state.config)?;

    Ok(Json(LoginResponse {
        token,
        role: user.role,
        user_id: user.id,
        username: user.username,
    }))
}

/// get_profile
///
/// [Authenticated Route] Returns the caller's own account record.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_profile(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state
        .repo
        .get_user(id)
        .await
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    Ok(Json(user.into()))
}

/// list_users
///
/// [Admin Route] Lists every account for the management console.
#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "All users", body = [UserProfile]))
)]
pub async fn list_users(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.list_users().await))
}
