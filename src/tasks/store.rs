/**
 * Task Store
 *
 * This module defines the storage seam for task records and its Postgres
 * implementation. The trait is object-safe so the server can run against
 * either Postgres (when `DATABASE_URL` is configured) or the in-memory
 * backing (local development and tests) behind the same `Arc<dyn TaskStore>`.
 *
 * # Atomicity
 *
 * `add_collaborators` is a single set-union statement: the stored
 * collaborator array never contains duplicates, and concurrent unions
 * cannot interleave partial results. Concurrent `update` calls on the same
 * task are last-write-wins; the store does not arbitrate.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::tasks::model::{NewTask, Task, TaskChanges};

/// Storage operations for task records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new task and return the stored record.
    async fn create(&self, new_task: NewTask) -> Result<Task, StoreError>;

    /// Fetch one task by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Fetch every task the user owns or collaborates on.
    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Fetch only the tasks where the user is a collaborator.
    async fn find_collaborating(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Apply a partial update. Returns `None` when the id does not resolve.
    async fn update(&self, id: Uuid, changes: TaskChanges) -> Result<Option<Task>, StoreError>;

    /// Set-union `collaborators` into the task's collaborator set.
    /// Returns `None` when the id does not resolve.
    async fn add_collaborators(
        &self,
        id: Uuid,
        collaborators: Vec<Uuid>,
    ) -> Result<Option<Task>, StoreError>;

    /// Delete a task. Returns `false` when the id does not resolve.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Row shape for the `tasks` table; priority and status are stored as text.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: String,
    status: String,
    collaborators: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            priority: crate::tasks::model::Priority::parse(&row.priority).unwrap_or_default(),
            status: crate::tasks::model::Status::parse(&row.status).unwrap_or_default(),
            collaborators: row.collaborators,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TASK_COLUMNS: &str =
    "id, owner_id, title, description, due_date, priority, status, collaborators, created_at, updated_at";

/// Postgres-backed task store.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            INSERT INTO tasks (id, owner_id, title, description, due_date, priority, status, collaborators, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(new_task.owner_id)
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(new_task.due_date)
        .bind(new_task.priority.as_str())
        .bind(new_task.status.as_str())
        .bind(&new_task.collaborators)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            SELECT {TASK_COLUMNS} FROM tasks
            WHERE owner_id = $1 OR $1 = ANY(collaborators)
            ORDER BY created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn find_collaborating(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            SELECT {TASK_COLUMNS} FROM tasks
            WHERE $1 = ANY(collaborators)
            ORDER BY created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> Result<Option<Task>, StoreError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                priority = COALESCE($5, priority),
                status = COALESCE($6, status),
                updated_at = $7
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.due_date)
        .bind(changes.priority.map(|p| p.as_str()))
        .bind(changes.status.map(|s| s.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn add_collaborators(
        &self,
        id: Uuid,
        collaborators: Vec<Uuid>,
    ) -> Result<Option<Task>, StoreError> {
        // Single-statement union keeps the operation atomic and set-semantic.
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks SET
                collaborators = ARRAY(SELECT DISTINCT unnest(collaborators || $2::uuid[])),
                updated_at = $3
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&collaborators)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
