//! Common test utilities
//!
//! Builds a test server over isolated in-memory stores, with direct access
//! to the application state so tests can observe the realtime channels and
//! inject presence entries.

use std::sync::Arc;

use axum_test::TestServer;
use taskhub::auth::users::MemoryUserStore;
use taskhub::realtime::presence::{ClientHandle, ConnId};
use taskhub::realtime::protocol::ServerEvent;
use taskhub::routes::create_router;
use taskhub::server::AppState;
use taskhub::tasks::memory::MemoryTaskStore;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Handles to everything a test may want to poke at.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub tasks: MemoryTaskStore,
    pub users: MemoryUserStore,
}

/// Spin up a server over fresh in-memory stores.
pub fn spawn_app() -> TestApp {
    let users = MemoryUserStore::new();
    let tasks = MemoryTaskStore::new();
    let state = AppState::new(Arc::new(users.clone()), Arc::new(tasks.clone()));
    let server = TestServer::new(create_router(state.clone())).expect("test server");
    TestApp {
        server,
        state,
        tasks,
        users,
    }
}

/// Register `user` as identified on a fresh connection; returns the
/// targeted-delivery receiver for that connection.
pub fn identify(state: &AppState, user: Uuid) -> mpsc::UnboundedReceiver<ServerEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    state.presence.put(user, ClientHandle::new(ConnId::next(), tx));
    rx
}

/// Create-task request body with just the required fields.
pub fn create_task_body(owner: Uuid, title: &str) -> serde_json::Value {
    serde_json::json!({
        "userId": owner.to_string(),
        "title": title,
    })
}
