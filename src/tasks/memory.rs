/**
 * In-memory Task Store
 *
 * `TaskStore` backing used when no database is configured and by the test
 * suite. Semantics mirror the Postgres store: set-semantic collaborator
 * union, last-write-wins updates, `None`/`false` for unresolved ids.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::tasks::model::{NewTask, Task, TaskChanges};
use crate::tasks::store::TaskStore;

#[derive(Clone, Default)]
pub struct MemoryTaskStore {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks. Used by tests to verify that rejected
    /// requests never reached the store.
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let mut collaborators = Vec::new();
        for id in new_task.collaborators {
            if !collaborators.contains(&id) {
                collaborators.push(id);
            }
        }

        let task = Task {
            id: Uuid::new_v4(),
            owner_id: new_task.owner_id,
            title: new_task.title,
            description: new_task.description,
            due_date: new_task.due_date,
            priority: new_task.priority,
            status: new_task.status,
            collaborators,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut found: Vec<Task> = tasks
            .values()
            .filter(|t| t.owner_id == user_id || t.collaborators.contains(&user_id))
            .cloned()
            .collect();
        found.sort_by_key(|t| t.created_at);
        Ok(found)
    }

    async fn find_collaborating(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut found: Vec<Task> = tasks
            .values()
            .filter(|t| t.collaborators.contains(&user_id))
            .cloned()
            .collect();
        found.sort_by_key(|t| t.created_at);
        Ok(found)
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn add_collaborators(
        &self,
        id: Uuid,
        collaborators: Vec<Uuid>,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };

        for collaborator in collaborators {
            if !task.collaborators.contains(&collaborator) {
                task.collaborators.push(collaborator);
            }
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::model::{Priority, Status};
    use pretty_assertions::assert_eq;

    fn new_task(owner: Uuid, collaborators: Vec<Uuid>) -> NewTask {
        NewTask {
            owner_id: owner,
            title: "Write spec".to_string(),
            description: None,
            due_date: None,
            priority: Priority::default(),
            status: Status::default(),
            collaborators,
        }
    }

    #[tokio::test]
    async fn add_collaborators_is_set_semantic() {
        let store = MemoryTaskStore::new();
        let owner = Uuid::new_v4();
        let u2 = Uuid::new_v4();
        let u3 = Uuid::new_v4();

        let task = store.create(new_task(owner, vec![u2])).await.unwrap();

        // u2 is already a collaborator; the union must not duplicate it.
        let updated = store
            .add_collaborators(task.id, vec![u2, u3, u3])
            .await
            .unwrap()
            .expect("task exists");

        assert_eq!(updated.collaborators.len(), 2);
        assert!(updated.collaborators.contains(&u2));
        assert!(updated.collaborators.contains(&u3));
    }

    #[tokio::test]
    async fn find_for_user_covers_ownership_and_collaboration() {
        let store = MemoryTaskStore::new();
        let owner = Uuid::new_v4();
        let collaborator = Uuid::new_v4();

        store.create(new_task(owner, vec![collaborator])).await.unwrap();
        store.create(new_task(collaborator, vec![])).await.unwrap();

        assert_eq!(store.find_for_user(owner).await.unwrap().len(), 1);
        assert_eq!(store.find_for_user(collaborator).await.unwrap().len(), 2);
        assert_eq!(store.find_collaborating(collaborator).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = MemoryTaskStore::new();
        let result = store
            .update(Uuid::new_v4(), TaskChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_task_existed() {
        let store = MemoryTaskStore::new();
        let task = store.create(new_task(Uuid::new_v4(), vec![])).await.unwrap();

        assert!(store.delete(task.id).await.unwrap());
        assert!(!store.delete(task.id).await.unwrap());
        assert!(store.find_by_id(task.id).await.unwrap().is_none());
    }
}
