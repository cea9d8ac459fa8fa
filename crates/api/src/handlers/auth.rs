//! Handlers for login and logout.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use reqdesk_core::error::CoreError;
use reqdesk_db::models::user::UserInfo;
use reqdesk_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Message returned for every failed login, so callers cannot tell an
/// unknown user from a wrong password or a disabled account.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
///
/// Both fields default to empty so a missing field is reported as a 400
/// with a readable message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with username + password and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password are required".into(),
        ));
    }

    let user = UserRepo::find_by_username(&state.pool, username)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            tracing::info!(username, "Login rejected: unknown or inactive user");
            AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let jwt = &state.config.jwt;
    let token = generate_access_token(user.id, &user.username, &user.rol, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        user: UserInfo::from(&user),
        token,
        expires_in: jwt.access_token_expiry_mins * 60,
    }))
}

/// POST /api/logout
///
/// Acknowledge a logout. Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out",
    })
}
