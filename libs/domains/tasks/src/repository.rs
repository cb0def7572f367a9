use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task};

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations can use different storage backends (PostgreSQL, in-memory)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task and return it with its assigned id
    async fn create(&self, input: NewTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// List all tasks, ordered by id
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Write every mutable field of an existing task
    async fn save(&self, task: Task) -> TaskResult<Task>;

    /// Delete a task by ID. Returns `false` if nothing was deleted.
    async fn delete(&self, id: i32) -> TaskResult<bool>;

    /// Count all tasks
    async fn count(&self) -> TaskResult<usize>;
}

#[derive(Default)]
struct Store {
    tasks: BTreeMap<i32, Task>,
    last_id: i32,
}

/// In-memory repository for development and tests
///
/// Ids are handed out from a counter and never reused, matching a SERIAL
/// column.
#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        store.last_id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| TaskError::Internal("Task id space exhausted".to_string()))?;

        let task = Task {
            id: store.last_id,
            title: input.title,
            description: input.description,
            done: input.done,
        };
        store.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.values().cloned().collect())
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        let slot = store
            .tasks
            .get_mut(&task.id)
            .ok_or(TaskError::NotFound(task.id))?;
        *slot = task.clone();

        tracing::info!(task_id = task.id, "Updated task");
        Ok(task)
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let mut store = self.store.write().await;
        let deleted = store.tasks.remove(&id).is_some();

        if deleted {
            tracing::info!(task_id = id, "Deleted task");
        }
        Ok(deleted)
    }

    async fn count(&self) -> TaskResult<usize> {
        let store = self.store.read().await;
        Ok(store.tasks.len())
    }
}
