/**
 * API Route Configuration
 *
 * This module wires the task, authentication and user-directory handlers
 * into the router.
 *
 * # Routes
 *
 * ## Tasks
 * - `POST /api/tasks` - create task (validates, then dispatches `taskAdded`)
 * - `GET /api/tasks/{user_id}` - tasks owned by or shared with a user
 * - `GET /api/tasks/collaborated/{user_id}` - collaborating-only view
 * - `GET /api/task/{id}` - one task
 * - `PUT /api/tasks/{id}` - update (dispatches `taskUpdated`)
 * - `PUT /api/tasks/{id}/collaborators` - collaborator add (dispatches
 *   `taskUpdated`)
 * - `DELETE /api/tasks/{id}` - delete (no dispatch)
 *
 * ## Authentication
 * - `POST /api/auth/signup` - public
 * - `POST /api/auth/login` - public
 * - `GET /api/auth/me` - requires bearer token
 *
 * ## Users
 * - `GET /api/users`, `GET /api/users/search`, `GET /api/users/{id}`
 */

use axum::{middleware, Router};

use crate::auth::handlers::{get_me, get_user, list_users, login, search_users, signup};
use crate::middleware::auth::auth_middleware;
use crate::server::state::AppState;
use crate::tasks::handlers::{
    add_collaborators, create_task, delete_task, get_collaborated_tasks, get_task,
    get_tasks_for_user, update_task,
};

/// Configure API routes.
///
/// `app_state` is needed eagerly for the auth middleware layer, which
/// captures its own state handle.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        // Task endpoints
        .route("/api/tasks", axum::routing::post(create_task))
        .route(
            "/api/tasks/collaborated/{user_id}",
            axum::routing::get(get_collaborated_tasks),
        )
        .route(
            "/api/tasks/{id}",
            axum::routing::get(get_tasks_for_user)
                .put(update_task)
                .delete(delete_task),
        )
        .route(
            "/api/tasks/{id}/collaborators",
            axum::routing::put(add_collaborators),
        )
        .route("/api/task/{id}", axum::routing::get(get_task))
        // Authentication endpoints
        .route("/api/auth/signup", axum::routing::post(signup))
        .route("/api/auth/login", axum::routing::post(login))
        .route(
            "/api/auth/me",
            axum::routing::get(get_me).layer(middleware::from_fn_with_state(
                app_state.clone(),
                auth_middleware,
            )),
        )
        // User directory endpoints
        .route("/api/users", axum::routing::get(list_users))
        .route("/api/users/search", axum::routing::get(search_users))
        .route("/api/users/{id}", axum::routing::get(get_user))
}
