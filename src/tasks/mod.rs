//! Tasks Module
//!
//! Task records, their storage seam, and the REST mutation/query handlers.
//!
//! # Module Structure
//!
//! ```text
//! tasks/
//! ├── mod.rs      - Module exports
//! ├── model.rs    - Task record and request payloads
//! ├── store.rs    - TaskStore trait + Postgres implementation
//! ├── memory.rs   - In-memory implementation (no-database mode, tests)
//! └── handlers.rs - REST handlers and dispatch glue
//! ```
//!
//! # Dispatch Glue
//!
//! Create and update mutations (including collaborator adds) hand the
//! post-mutation record to the event dispatcher on success. Deletes do
//! not; see `handlers::delete_task`.

/// Task record and request payloads
pub mod model;

/// Storage trait and Postgres implementation
pub mod store;

/// In-memory store implementation
pub mod memory;

/// REST handlers
pub mod handlers;

// Re-export commonly used types
pub use memory::MemoryTaskStore;
pub use model::{NewTask, Priority, Status, Task, TaskChanges};
pub use store::{PgTaskStore, TaskStore};
