//! Authentication routes: register, login with lockout, token refresh,
//! profile, password management and email verification.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use atrium_core::auth::{
    self, UserRole, hash_password, validate_password_strength, verify_password,
};
use atrium_db::entities::sea_orm_active_enums::UserRole as DbUserRole;
use atrium_db::repositories::user::{CreateUserInput, UpdateProfileInput};
use atrium_db::UserRepository;
use atrium_shared::auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RegisterRequest,
    RequestResetRequest, RequestVerificationRequest, ResetPasswordRequest, UpdateProfileRequest,
    UserInfo,
};

use crate::AppState;
use crate::middleware::auth::{AuthUser, entity_role};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh))
        .route("/auth/request-reset", post(request_password_reset))
        .route("/auth/reset/{token}", post(reset_password))
        .route("/auth/request-verification", post(request_verification))
        .route("/auth/verify/{token}", post(verify_email))
}

/// Creates the auth routes that require an authenticated principal.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(get_profile))
        .route("/auth/profile", put(update_profile))
        .route("/auth/change-password", post(change_password))
}

fn internal_error(context: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": format!("An error occurred during {context}")
        })),
    )
        .into_response()
}

fn user_info(user: &atrium_db::entities::users::Model) -> UserInfo {
    let role = entity_role(&user.role);
    UserInfo {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        role: role.to_string(),
        permissions: role.permissions().iter().map(ToString::to_string).collect(),
    }
}

fn db_role(role: UserRole) -> DbUserRole {
    match role {
        UserRole::Admin => DbUserRole::Admin,
        UserRole::Registrar => DbUserRole::Registrar,
        UserRole::Finance => DbUserRole::Finance,
        UserRole::Instructor => DbUserRole::Instructor,
        UserRole::SalesRep => DbUserRole::SalesRep,
        UserRole::Marketing => DbUserRole::Marketing,
        UserRole::Student => DbUserRole::Student,
    }
}

fn fresh_token() -> String {
    // Two v4 UUIDs give 64 hex chars of CSPRNG-backed token.
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    if let Err(e) = validate_password_strength(&payload.password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "weak_password", "message": e.to_string() })),
        )
            .into_response();
    }

    let role = match payload.role.as_deref() {
        None => UserRole::Student,
        Some(name) => match UserRole::parse(name) {
            Some(role) => role,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_role",
                        "message": "Unknown role"
                    })),
                )
                    .into_response();
            }
        },
    };

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error("registration");
        }
    }

    match user_repo.username_exists(&payload.username).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "username_exists",
                    "message": "This username is already taken"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking username");
            return internal_error("registration");
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("registration");
        }
    };

    let user = match user_repo
        .create(CreateUserInput {
            username: payload.username,
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            role: db_role(role),
            department: payload.department,
            position: payload.position,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("registration");
        }
    };

    info!(user_id = %user.id, email = %user.email, "New user registered");

    let (access_token, refresh_token) = match issue_tokens(&state, user.id, role) {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    (
        StatusCode::CREATED,
        Json(LoginResponse {
            user: user_info(&user),
            access_token,
            refresh_token,
            expires_in: state.jwt_service.access_token_expires_in(),
        }),
    )
        .into_response()
}

fn issue_tokens(
    state: &AppState,
    user_id: Uuid,
    role: UserRole,
) -> Result<(String, String), axum::response::Response> {
    let role = role.to_string();
    let access = state
        .jwt_service
        .generate_access_token(user_id, &role)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            internal_error("login")
        })?;
    let refresh = state
        .jwt_service
        .generate_refresh_token(user_id, &role)
        .map_err(|e| {
            error!(error = %e, "Failed to generate refresh token");
            internal_error("login")
        })?;
    Ok((access, refresh))
}

/// POST /auth/login - Authenticate and return tokens.
///
/// Five consecutive password failures lock the account for two hours; a
/// locked account rejects even a correct password.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let now = Utc::now();

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("login");
        }
    };

    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    if auth::is_locked(user.locked_until.map(Into::into), now) {
        warn!(user_id = %user.id, "Login attempt against locked account");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_locked",
                "message": "Account is locked. Please try again later."
            })),
        )
            .into_response();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            let update = auth::register_failed_attempt(
                user.failed_login_attempts,
                user.locked_until.map(Into::into),
                now,
            );
            let user_id = user.id;
            if let Err(e) = user_repo
                .record_failed_login(user, update.attempts, update.locked_until)
                .await
            {
                error!(error = %e, "Failed to persist login attempt");
            }
            info!(
                user_id = %user_id,
                attempts = update.attempts,
                locked = update.locked_until.is_some(),
                "Failed login attempt"
            );
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("login");
        }
    }

    let user = match user_repo.record_successful_login(user).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "Failed to record login");
            return internal_error("login");
        }
    };

    let role = entity_role(&user.role);
    let (access_token, refresh_token) = match issue_tokens(&state, user.id, role) {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    info!(user_id = %user.id, "User logged in successfully");

    (
        StatusCode::OK,
        Json(LoginResponse {
            user: user_info(&user),
            access_token,
            refresh_token,
            expires_in: state.jwt_service.access_token_expires_in(),
        }),
    )
        .into_response()
}

/// POST /auth/logout - Stateless acknowledgement.
async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Logged out successfully" })),
    )
}

/// POST /auth/refresh - Exchange a refresh token for a new access token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            let (error, message) = match e {
                atrium_shared::JwtError::Expired => ("token_expired", "Refresh token has expired"),
                _ => ("invalid_token", "Invalid refresh token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), &claims.role)
    {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("token refresh");
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response()
}

/// POST /auth/request-reset - Send a password reset email.
///
/// Never reveals whether the account exists.
async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<RequestResetRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let neutral = (
        StatusCode::OK,
        Json(json!({
            "message": "If an account with that email exists, a reset link has been sent"
        })),
    )
        .into_response();

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return neutral,
        Err(e) => {
            error!(error = %e, "Database error during reset request");
            return internal_error("password reset");
        }
    };

    let token = fresh_token();
    let user = match user_repo.set_reset_token(user, token.clone()).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "Failed to store reset token");
            return internal_error("password reset");
        }
    };

    if let Err(e) = state
        .email_service
        .send_password_reset_email(&user.email, &user.first_name, &token)
        .await
    {
        error!(error = %e, "Failed to send reset email");
    }

    neutral
}

/// POST /auth/reset/{token} - Set a new password from a reset token.
async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    if let Err(e) = validate_password_strength(&payload.password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "weak_password", "message": e.to_string() })),
        )
            .into_response();
    }

    let user = match user_repo.find_by_reset_token(&token).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Invalid or expired reset token"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during password reset");
            return internal_error("password reset");
        }
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("password reset");
        }
    };

    let user_id = user.id;
    if let Err(e) = user_repo.change_password(user, password_hash).await {
        error!(error = %e, "Failed to update password");
        return internal_error("password reset");
    }

    info!(user_id = %user_id, "Password reset completed");

    (
        StatusCode::OK,
        Json(json!({ "message": "Password reset successfully" })),
    )
        .into_response()
}

/// POST /auth/request-verification - Send a verification email.
async fn request_verification(
    State(state): State<AppState>,
    Json(payload): Json<RequestVerificationRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not_found", "message": "User not found" })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during verification request");
            return internal_error("email verification");
        }
    };

    if user.email_verified_at.is_some() {
        return (
            StatusCode::OK,
            Json(json!({ "message": "Email is already verified" })),
        )
            .into_response();
    }

    let token = fresh_token();
    let user = match user_repo.set_verification_token(user, token.clone()).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "Failed to store verification token");
            return internal_error("email verification");
        }
    };

    if let Err(e) = state
        .email_service
        .send_verification_email(&user.email, &user.first_name, &token)
        .await
    {
        error!(error = %e, "Failed to send verification email");
    }

    (
        StatusCode::OK,
        Json(json!({ "message": "Verification email sent" })),
    )
        .into_response()
}

/// POST /auth/verify/{token} - Verify an email address.
async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.verify_email_token(&token).await {
        Ok(Some(user)) => {
            info!(user_id = %user.id, "Email verified");
            (
                StatusCode::OK,
                Json(json!({ "message": "Email verified successfully", "verified": true })),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_token",
                "message": "Invalid or expired verification token"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error during email verification");
            internal_error("email verification")
        }
    }
}

/// GET /auth/profile - The authenticated user's profile.
async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "User not found" })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            internal_error("profile fetch")
        }
    }
}

/// PUT /auth/profile - Update allow-listed profile fields.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not_found", "message": "User not found" })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            return internal_error("profile update");
        }
    };

    match user_repo
        .update_profile(
            user,
            UpdateProfileInput {
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
                department: payload.department,
                position: payload.position,
                bio: payload.bio,
                preferences: payload.preferences,
            },
        )
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, "Profile updated");
            (StatusCode::OK, Json(json!({ "user": user }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update profile");
            internal_error("profile update")
        }
    }
}

/// POST /auth/change-password - Change password, verifying the current one.
async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    if let Err(e) = validate_password_strength(&payload.new_password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "weak_password", "message": e.to_string() })),
        )
            .into_response();
    }

    let user = match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not_found", "message": "User not found" })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading user");
            return internal_error("password change");
        }
    };

    match verify_password(&payload.current_password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Current password is incorrect"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("password change");
        }
    }

    let password_hash = match hash_password(&payload.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("password change");
        }
    };

    match user_repo.change_password(user, password_hash).await {
        Ok(user) => {
            info!(user_id = %user.id, "Password changed");
            (
                StatusCode::OK,
                Json(json!({ "message": "Password changed successfully" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to change password");
            internal_error("password change")
        }
    }
}
