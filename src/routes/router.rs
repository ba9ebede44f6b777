/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the realtime endpoint and the API routes into a single Axum router.
 *
 * # Route Order
 *
 * 1. Realtime WebSocket endpoint (`/ws`)
 * 2. API routes (tasks, auth, users)
 * 3. Fallback handler (404)
 *
 * Static segments take precedence over path parameters, so
 * `/api/tasks/collaborated/{user_id}` matches before `/api/tasks/{user_id}`.
 */

use axum::Router;

use crate::realtime::socket::ws_handler;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
///
/// # Route Details
///
/// ## Realtime
///
/// - `GET /ws` - WebSocket upgrade; carries `identify` frames inbound and
///   `taskAdded`/`taskUpdated`/`newCollaboratorTask` frames outbound
///
/// ## API Routes
///
/// See `configure_api_routes` for the task, auth and user endpoints.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/ws", axum::routing::get(ws_handler));

    let router = configure_api_routes(router, &app_state);

    let router = router.fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
