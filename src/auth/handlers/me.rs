/**
 * Current User Handler
 *
 * GET /api/auth/me - returns the authenticated user's profile. Runs behind
 * the bearer-token middleware, which verifies the JWT and attaches the
 * authenticated identity to the request.
 */

use axum::{extract::State, response::Json, Extension};

use crate::auth::handlers::types::UserResponse;
use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::server::state::AppState;

/// Get current user handler
///
/// # Errors
///
/// * `404 Not Found` - token valid but the user no longer exists
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(&user)))
}
