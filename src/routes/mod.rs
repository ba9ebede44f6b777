//! Routes Module
//!
//! HTTP route configuration and router assembly.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - Router assembly (realtime + API + fallback)
//! └── api_routes.rs - Task, auth and user endpoints
//! ```

/// Router assembly
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
