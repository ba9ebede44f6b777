//! Authentication and User Management
//!
//! User accounts, bcrypt password hashing, JWT sessions and the user
//! directory. User ids issued here are the identities used by task
//! ownership, collaborator sets and the presence registry.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── users.rs    - User model and store (Postgres + in-memory)
//! ├── sessions.rs - JWT token creation and verification
//! └── handlers/   - signup, login, me, user directory
//! ```

/// User model and store
pub mod users;

/// JWT session tokens
pub mod sessions;

/// HTTP handlers
pub mod handlers;

// Re-export commonly used types
pub use handlers::{get_me, get_user, list_users, login, search_users, signup};
pub use sessions::{create_token, verify_token, Claims};
pub use users::{MemoryUserStore, PgUserStore, User, UserStore};
