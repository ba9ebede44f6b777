/**
 * Login Handler
 *
 * User authentication for POST /api/auth/login.
 *
 * # Security
 *
 * - Unknown email and wrong password return the same 401 (no enumeration)
 * - Password verification uses bcrypt's constant-time comparison
 * - Passwords are never logged or returned
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - storage or token failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.email);

    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!("Failed login attempt for: {}", request.email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = create_token(user.id, user.email.clone())
        .map_err(|e| ApiError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}
