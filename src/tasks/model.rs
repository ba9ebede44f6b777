/**
 * Task Model
 *
 * This module defines the task record and the request payloads accepted by
 * the mutation endpoints. Field names on the wire are camelCase to match
 * the client's JSON shapes.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority. Defaults to `Low` when omitted at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

/// Task workflow status. Defaults to `Pending` when omitted at creation.
///
/// `InProgress` is spelled "In Progress" on the wire and in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Status::Pending),
            "In Progress" => Some(Status::InProgress),
            "Completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

/// A task record as stored and as carried by realtime events.
///
/// `collaborators` is set-semantic: the store's add-collaborators operation
/// performs a deduplicating union, so the vector never contains duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub status: Status,
    pub collaborators: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for the create operation, produced by the create handler
/// after field validation and handed to the store.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub status: Status,
    pub collaborators: Vec<Uuid>,
}

/// Create-task request body (POST /api/tasks).
///
/// `user_id` and `title` are deliberately `Option` so the handler can
/// reject missing fields with a validation error before the store is ever
/// consulted, rather than letting deserialization produce an opaque 422.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub collaborators: Option<Vec<Uuid>>,
}

/// Partial update request body (PUT /api/tasks/{id}).
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

/// Add-collaborators request body (PUT /api/tasks/{id}/collaborators).
#[derive(Debug, Deserialize)]
pub struct AddCollaboratorsRequest {
    pub collaborators: Vec<Uuid>,
}
