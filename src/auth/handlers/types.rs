/**
 * Authentication Handler Types
 *
 * Request and response types shared across the signup, login and user
 * directory handlers.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's chosen display name
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login. Contains the JWT token and user
/// information for immediate authentication.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication (30-day expiration)
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    /// User's display name
    pub username: String,
    /// User's email address
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// User search query (GET /api/users/search?q=...)
#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    pub q: String,
}
