/**
 * User Directory Handlers
 *
 * Lookup endpoints backing the collaborator picker:
 * - `GET /api/users` - all users
 * - `GET /api/users/search?q=` - case-insensitive username search
 * - `GET /api/users/{id}` - one user
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use uuid::Uuid;

use crate::auth::handlers::types::{SearchQuery, UserResponse};
use crate::error::ApiError;
use crate::server::state::AppState;

/// List all users (GET /api/users).
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Search users by username (GET /api/users/search?q=...).
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.search(&query.q).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Get one user by id (GET /api/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(&user)))
}
