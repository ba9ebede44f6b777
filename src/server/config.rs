/**
 * Server Configuration
 *
 * This module loads server configuration from the environment and builds
 * the storage backends.
 *
 * # Configuration Sources
 *
 * Environment variables, with development-friendly defaults:
 * - `SERVER_PORT` - listen port (default 8000)
 * - `DATABASE_URL` - Postgres connection string (optional)
 * - `JWT_SECRET` - token signing key
 * - `FRONTEND_URL` - CORS allow-origin (optional; permissive when unset)
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent startup: when the
 * database is not configured or unreachable, the server falls back to
 * in-memory stores (presence was never persistent to begin with).
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::users::{MemoryUserStore, PgUserStore, UserStore};
use crate::tasks::memory::MemoryTaskStore;
use crate::tasks::store::{PgTaskStore, TaskStore};

/// Listen port from `SERVER_PORT`, defaulting to 8000.
pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8000)
}

/// Connect to Postgres and run migrations.
///
/// Returns `None` when `DATABASE_URL` is not set or the connection fails;
/// callers fall back to in-memory storage.
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory stores");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(e) => {
            // Migrations may already have been applied out of band.
            tracing::error!("Failed to run database migrations: {:?}", e);
            tracing::warn!("Continuing - database might not be up to date");
        }
    }

    Some(pool)
}

/// Build the user and task stores over the configured backend.
pub async fn load_stores() -> (Arc<dyn UserStore>, Arc<dyn TaskStore>) {
    match load_database().await {
        Some(pool) => (
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgTaskStore::new(pool)),
        ),
        None => (
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryTaskStore::new()),
        ),
    }
}
