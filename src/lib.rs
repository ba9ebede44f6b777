//! TaskHub
//!
//! Collaborative task tracking with realtime fan-out. Mutations made over
//! the REST surface reach every open client session with low latency:
//! every successful create/update is broadcast to all connections, and
//! collaborators on the mutated task additionally receive a targeted
//! notification when they have a live, identified connection.
//!
//! # Architecture
//!
//! - **`server`** - configuration, shared state, app assembly
//! - **`routes`** - router and API endpoints
//! - **`tasks`** - task records, storage seam, mutation handlers
//! - **`realtime`** - presence registry, WebSocket lifecycle, event dispatch
//! - **`auth`** - users, bcrypt + JWT authentication, user directory
//! - **`middleware`** - bearer-token middleware
//! - **`error`** - error taxonomy and HTTP conversion
//!
//! # Realtime Model
//!
//! The WebSocket channel (`/ws`) is identity-asserted, not authenticated:
//! clients announce who they are with an `identify` frame, which binds the
//! connection in the presence registry. Broadcast delivery reaches every
//! open connection regardless of identity; targeted delivery resolves a
//! task's collaborator set against the registry and silently skips anyone
//! offline. Delivery is fire-and-forget throughout.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Task records and handlers
pub mod tasks;

/// Realtime fan-out (presence, dispatch, sockets)
pub mod realtime;

/// Authentication and user management
pub mod auth;

/// Request middleware
pub mod middleware;

/// Error types
pub mod error;

// Re-export commonly used types
pub use error::ApiError;
pub use realtime::{EventDispatcher, PresenceRegistry, TaskEvent};
pub use server::{create_app, AppState};
