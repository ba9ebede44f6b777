/**
 * Connection Lifecycle Manager
 *
 * This module owns the WebSocket endpoint (`GET /ws`) and keeps the
 * presence registry consistent as connections open, identify, and close.
 *
 * # Connection States
 *
 * - **Open**: socket accepted, no identity announced yet. The connection
 *   already receives broadcast events.
 * - **Identified**: an `identify` frame bound the connection to a user
 *   identity in the presence registry. Re-identifying re-puts; identifying
 *   an identity bound to another connection supersedes that binding.
 * - **Closed**: terminal. Reached from both prior states; the registry
 *   entry (if any) is purged here, not on next access.
 *
 * # Delivery Plumbing
 *
 * Each connection spawns a writer task fed from two sources: the
 * dispatcher's broadcast channel (all-connections fan-out) and a private
 * mpsc channel registered as the connection's presence handle (targeted
 * fan-out). Both are forwarded to the socket as JSON text frames; a failed
 * socket send ends the writer.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::realtime::dispatch::TaskEvent;
use crate::realtime::presence::{ClientHandle, ConnId};
use crate::realtime::protocol::{ClientMessage, ServerEvent};
use crate::server::state::AppState;

/// WebSocket upgrade handler (GET /ws).
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one connection from accept to close.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn = ConnId::next();
    tracing::info!("[Socket] Connection {:?} opened", conn);

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Targeted-delivery channel; registered in the presence map on identify.
    let (targeted_tx, mut targeted_rx) = mpsc::unbounded_channel::<ServerEvent>();
    // Broadcast delivery starts immediately, before any identify.
    let mut broadcast_rx = state.dispatcher.subscribe();

    let writer = tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                targeted = targeted_rx.recv() => match targeted {
                    Some(event) => event,
                    None => break,
                },
                broadcast = broadcast_rx.recv() => match broadcast {
                    Ok(event) => event,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        // Saturated connection: drop what it missed, keep going.
                        tracing::warn!("[Socket] Connection lagged, dropped {} events", skipped);
                        continue;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                },
            };

            let frame = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("[Socket] Failed to serialize {}: {:?}", event.name(), e);
                    continue;
                }
            };

            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                // Client went away; the read loop will observe the close.
                tracing::debug!("[Socket] Send failed, client disconnected");
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                tracing::debug!("[Socket] Connection {:?} sent close frame", conn);
                break;
            }
            // Ping/Pong are answered by axum's protocol layer.
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("[Socket] Connection {:?} errored: {:?}", conn, e);
                break;
            }
        };

        let message: ClientMessage = match serde_json::from_str(&text) {
            Ok(message) => message,
            Err(e) => {
                // Malformed frames are dropped; the realtime layer never
                // reports errors back to the client.
                tracing::warn!("[Socket] Unparseable frame from {:?}: {}", conn, e);
                continue;
            }
        };

        handle_client_message(message, conn, &targeted_tx, &state);
    }

    // Purge on disconnect, reachable from Open and Identified alike.
    state.presence.remove_by_handle(conn);
    writer.abort();
    tracing::info!("[Socket] Connection {:?} closed", conn);
}

/// Apply one client frame to the registry or the dispatcher.
///
/// Factored out of the read loop so the lifecycle transitions are testable
/// without a live socket.
fn handle_client_message(
    message: ClientMessage,
    conn: ConnId,
    targeted_tx: &mpsc::UnboundedSender<ServerEvent>,
    state: &AppState,
) {
    match message {
        ClientMessage::Identify { user_id } => {
            state
                .presence
                .put(user_id, ClientHandle::new(conn, targeted_tx.clone()));
        }
        // Compatibility path: client-originated broadcast requests enter
        // the same dispatcher as REST mutations, so the fan-out logic is
        // not duplicated.
        ClientMessage::TaskAdded { task } => {
            state.dispatcher.dispatch(TaskEvent::Created(task));
        }
        ClientMessage::TaskUpdated { task } => {
            state.dispatcher.dispatch(TaskEvent::Updated(task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::state::AppState;
    use crate::tasks::model::{Priority, Status, Task};
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn test_state() -> AppState {
        AppState::in_memory()
    }

    fn sample_task(collaborators: Vec<Uuid>) -> Task {
        let now = chrono::Utc::now();
        Task {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "t".to_string(),
            description: None,
            due_date: None,
            priority: Priority::Low,
            status: Status::Pending,
            collaborators,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn identify_binds_connection() {
        let state = test_state();
        let conn = ConnId::next();
        let (tx, _rx) = mpsc::unbounded_channel();
        let user = Uuid::new_v4();

        handle_client_message(ClientMessage::Identify { user_id: user }, conn, &tx, &state);

        let handle = state.presence.lookup(user).expect("identity bound");
        assert_eq!(handle.conn, conn);
    }

    #[tokio::test]
    async fn reidentify_same_connection_is_idempotent() {
        let state = test_state();
        let conn = ConnId::next();
        let (tx, _rx) = mpsc::unbounded_channel();
        let user = Uuid::new_v4();

        handle_client_message(ClientMessage::Identify { user_id: user }, conn, &tx, &state);
        handle_client_message(ClientMessage::Identify { user_id: user }, conn, &tx, &state);

        assert_eq!(state.presence.len(), 1);
        assert_eq!(state.presence.lookup(user).unwrap().conn, conn);
    }

    #[tokio::test]
    async fn compat_task_added_reenters_dispatcher() {
        let state = test_state();
        let conn = ConnId::next();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut broadcast = state.dispatcher.subscribe();

        let task = sample_task(vec![]);
        handle_client_message(
            ClientMessage::TaskAdded { task: task.clone() },
            conn,
            &tx,
            &state,
        );

        assert_matches!(
            broadcast.recv().await.unwrap(),
            ServerEvent::TaskAdded { task: t } if t.id == task.id
        );
    }

    #[tokio::test]
    async fn compat_task_updated_targets_collaborators() {
        let state = test_state();
        let conn = ConnId::next();
        let (tx, _rx) = mpsc::unbounded_channel();

        // Another user is identified on a second connection.
        let collaborator = Uuid::new_v4();
        let (collab_tx, mut collab_rx) = mpsc::unbounded_channel();
        state
            .presence
            .put(collaborator, ClientHandle::new(ConnId::next(), collab_tx));

        handle_client_message(
            ClientMessage::TaskUpdated {
                task: sample_task(vec![collaborator]),
            },
            conn,
            &tx,
            &state,
        );

        assert_matches!(
            collab_rx.recv().await.unwrap(),
            ServerEvent::NewCollaboratorTask { .. }
        );
    }
}
