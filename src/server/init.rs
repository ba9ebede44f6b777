/**
 * Server Initialization
 *
 * This module assembles the Axum application: storage backends, realtime
 * plumbing (presence registry + event dispatcher), and routes.
 *
 * # Initialization Process
 *
 * 1. Load stores (Postgres when configured, in-memory otherwise)
 * 2. Create the presence registry and event dispatcher
 * 3. Configure the router with CORS
 *
 * The presence registry is intentionally not restored from anywhere: it
 * reflects live connections only and starts empty on every boot.
 */

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::router::create_router;
use crate::server::config::load_stores;
use crate::server::state::AppState;

/// Create and configure the Axum application.
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing taskhub server");

    let (users, tasks) = load_stores().await;
    let app_state = AppState::new(users, tasks);

    tracing::info!("Stores and realtime dispatcher initialized");

    create_router(app_state).layer(cors_layer())
}

/// CORS policy: locked to `FRONTEND_URL` when set, permissive otherwise
/// (local development).
fn cors_layer() -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    match std::env::var("FRONTEND_URL")
        .ok()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => {
            tracing::info!("CORS restricted to {:?}", origin);
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(methods)
                .allow_headers(Any)
        }
        None => {
            tracing::warn!("FRONTEND_URL not set, CORS is permissive");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(Any)
        }
    }
}
