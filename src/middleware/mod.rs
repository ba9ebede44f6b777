//! Middleware Module
//!
//! Request-processing middleware for the HTTP API.

/// Bearer-token authentication
pub mod auth;

pub use auth::{auth_middleware, AuthenticatedUser};
