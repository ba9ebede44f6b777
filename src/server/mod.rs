//! Server Module
//!
//! Server configuration, shared application state and app assembly.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── config.rs - Environment configuration and store construction
//! ├── state.rs  - AppState and FromRef implementations
//! └── init.rs   - create_app (router + CORS)
//! ```

/// Environment configuration and store loading
pub mod config;

/// Application state
pub mod state;

/// App assembly
pub mod init;

// Re-export commonly used items
pub use init::create_app;
pub use state::AppState;
