//! Authentication Handlers
//!
//! HTTP handlers for signup, login, the current-user endpoint and the user
//! directory.

/// Request/response types
pub mod types;

/// User registration
pub mod signup;

/// User authentication
pub mod login;

/// Current user info
pub mod me;

/// User directory lookups
pub mod directory;

// Re-export handlers for route configuration
pub use directory::{get_user, list_users, search_users};
pub use login::login;
pub use me::get_me;
pub use signup::signup;
