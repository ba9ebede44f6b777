/**
 * Signup Handler
 *
 * User registration for POST /api/auth/signup.
 *
 * # Security
 *
 * - Passwords are bcrypt-hashed before storage and never logged
 * - Duplicate emails are rejected before any write
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Signup handler
///
/// # Errors
///
/// * `400 Bad Request` - missing field or email already registered
/// * `500 Internal Server Error` - hashing, storage or token failure
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.username.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(ApiError::validation("Please fill all required fields"));
    }

    if state.users.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::validation("User already exists, please sign in"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("Password hashing failed: {e}")))?;

    let user = state
        .users
        .create(request.username, request.email, password_hash)
        .await?;

    tracing::info!("New user registered: {}", user.id);

    let token = create_token(user.id, user.email.clone())
        .map_err(|e| ApiError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}
