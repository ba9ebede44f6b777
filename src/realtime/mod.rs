//! Realtime Fan-out Module
//!
//! This module is the bridge between synchronous REST mutations and the
//! asynchronous multi-client notification channel.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports
//! ├── presence.rs  - Identity → connection mapping
//! ├── protocol.rs  - WebSocket frame definitions
//! ├── dispatch.rs  - Broadcast vs targeted delivery decision
//! └── socket.rs    - WebSocket connection lifecycle
//! ```
//!
//! # Delivery Model
//!
//! Every successful mutation is dispatched twice: broadcast to all open
//! connections (any client may be viewing an unfiltered task list) and
//! targeted at the task's collaborators that currently have a live,
//! identified connection. Delivery is fire-and-forget; the mutating client
//! never observes realtime failures.

/// Identity to connection mapping
pub mod presence;

/// Wire frame definitions
pub mod protocol;

/// Event dispatch (broadcast + targeted delivery)
pub mod dispatch;

/// WebSocket connection lifecycle
pub mod socket;

// Re-export commonly used types
pub use dispatch::{EventDispatcher, TaskEvent};
pub use presence::{ClientHandle, ConnId, PresenceRegistry};
pub use protocol::{ClientMessage, ServerEvent};
pub use socket::ws_handler;
