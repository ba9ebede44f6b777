/**
 * Realtime Wire Protocol
 *
 * This module defines the JSON frames exchanged over the WebSocket channel.
 * Every frame is a tagged object: `{"type": "...", ...}`.
 *
 * # Message Names
 *
 * Client → server:
 * - `identify` - bind this connection to a user identity
 * - `taskAdded` / `taskUpdated` - compatibility path where the client asks
 *   the server to re-broadcast a mutation it already performed
 *
 * Server → client:
 * - `taskAdded` - a task was created (broadcast to every connection)
 * - `taskUpdated` - a task was updated (broadcast to every connection)
 * - `newCollaboratorTask` - targeted at each identity in the task's
 *   collaborator set
 *
 * The channel itself is not authenticated: `identify` asserts an identity,
 * it does not prove one.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tasks::model::Task;

/// Frames accepted from clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Bind this connection to `user_id` in the presence registry.
    #[serde(rename_all = "camelCase")]
    Identify { user_id: Uuid },
    /// Compatibility path: re-broadcast a task creation.
    TaskAdded { task: Task },
    /// Compatibility path: re-broadcast a task update.
    TaskUpdated { task: Task },
}

/// Frames pushed to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    TaskAdded { task: Task },
    TaskUpdated { task: Task },
    NewCollaboratorTask { task: Task },
}

impl ServerEvent {
    /// Wire name of this event, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::TaskAdded { .. } => "taskAdded",
            ServerEvent::TaskUpdated { .. } => "taskUpdated",
            ServerEvent::NewCollaboratorTask { .. } => "newCollaboratorTask",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn identify_frame_parses() {
        let user = Uuid::new_v4();
        let frame = format!(r#"{{"type":"identify","userId":"{user}"}}"#);
        let msg: ClientMessage = serde_json::from_str(&frame).unwrap();
        assert_matches!(msg, ClientMessage::Identify { user_id } if user_id == user);
    }

    #[test]
    fn server_event_is_tagged() {
        let task_json = serde_json::json!({
            "id": Uuid::new_v4(),
            "ownerId": Uuid::new_v4(),
            "title": "t",
            "description": null,
            "dueDate": null,
            "priority": "Low",
            "status": "Pending",
            "collaborators": [],
            "createdAt": chrono::Utc::now(),
            "updatedAt": chrono::Utc::now(),
        });
        let task: Task = serde_json::from_value(task_json).unwrap();

        let value = serde_json::to_value(ServerEvent::NewCollaboratorTask { task }).unwrap();
        assert_eq!(value["type"], "newCollaboratorTask");
        assert!(value.get("task").is_some());
    }

    #[test]
    fn unknown_frame_is_rejected() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"ping"}"#);
        assert!(result.is_err());
    }
}
