/**
 * Application State Management
 *
 * This module defines the application state structure and the `FromRef`
 * implementations for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container:
 * - User and task stores (trait objects; Postgres or in-memory)
 * - The presence registry (identity → live connection)
 * - The event dispatcher (broadcast + targeted fan-out)
 *
 * # Thread Safety
 *
 * Everything here is cheaply cloneable and shares underlying state:
 * stores are `Arc<dyn ...>`, the presence registry and dispatcher carry
 * their own `Arc`s internally.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::users::{MemoryUserStore, UserStore};
use crate::realtime::dispatch::EventDispatcher;
use crate::realtime::presence::PresenceRegistry;
use crate::tasks::memory::MemoryTaskStore;
use crate::tasks::store::TaskStore;

/// Application state shared by every handler and the WebSocket layer.
#[derive(Clone)]
pub struct AppState {
    /// User store (Postgres when `DATABASE_URL` is configured)
    pub users: Arc<dyn UserStore>,

    /// Task store (Postgres when `DATABASE_URL` is configured)
    pub tasks: Arc<dyn TaskStore>,

    /// Identity → connection mapping, maintained by the socket layer
    pub presence: PresenceRegistry,

    /// Fan-out of mutation events to connected clients
    pub dispatcher: EventDispatcher,
}

impl AppState {
    /// Build state over the given stores with a fresh presence registry
    /// and dispatcher.
    pub fn new(users: Arc<dyn UserStore>, tasks: Arc<dyn TaskStore>) -> Self {
        let presence = PresenceRegistry::new();
        let dispatcher = EventDispatcher::new(presence.clone());
        Self {
            users,
            tasks,
            presence,
            dispatcher,
        }
    }

    /// State over fresh in-memory stores. Used in no-database mode and by
    /// the test suite, which needs isolated instances per test.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryTaskStore::new()),
        )
    }
}

/// Allow handlers to extract the presence registry directly.
impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

/// Allow handlers to extract the dispatcher directly.
impl FromRef<AppState> for EventDispatcher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.dispatcher.clone()
    }
}
