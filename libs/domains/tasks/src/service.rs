use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, TaskPatch};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all tasks ordered by id
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: NewTask) -> TaskResult<Task> {
        input.validate().map_err(|e| TaskError::Validation(e.into()))?;

        self.repository.create(input).await
    }

    /// Overwrite all mutable fields of `current`
    #[instrument(skip(self, current, input), fields(task_id = current.id))]
    pub async fn replace_task(&self, mut current: Task, input: NewTask) -> TaskResult<Task> {
        input.validate().map_err(|e| TaskError::Validation(e.into()))?;

        current.replace_with(input);
        self.repository.save(current).await
    }

    /// Apply the fields present in `patch` to `current`
    #[instrument(skip(self, current, patch), fields(task_id = current.id))]
    pub async fn patch_task(&self, mut current: Task, patch: TaskPatch) -> TaskResult<Task> {
        if patch.is_empty() {
            return Ok(current);
        }

        current.apply_patch(patch);
        current
            .validate()
            .map_err(|e| TaskError::Validation(e.into()))?;
        self.repository.save(current).await
    }

    /// Delete a task, returning its last state
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<Task> {
        let task = self.get_task(id).await?;

        if !self.repository.delete(id).await? {
            return Err(TaskError::NotFound(id));
        }

        Ok(task)
    }

    /// Count all tasks
    pub async fn count_tasks(&self) -> TaskResult<usize> {
        self.repository.count().await
    }
}
