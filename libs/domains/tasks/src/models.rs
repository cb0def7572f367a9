use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const TASK_NOT_FOUND: &str = "Task not found";
pub const TASK_DELETED: &str = "Task deleted successfully";

/// Task entity - represents a persisted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Task {
    /// Server-assigned identifier
    pub id: i32,
    /// Task title
    #[validate(length(max = 150, message = "Longer than maximum length 150."))]
    #[schema(max_length = 150)]
    pub title: String,
    /// Optional free-form description
    #[validate(length(max = 500, message = "Longer than maximum length 500."))]
    #[schema(max_length = 500)]
    pub description: Option<String>,
    /// Whether the task is completed
    pub done: bool,
}

/// Validated payload for creating or fully replacing a task
#[derive(Debug, Clone, PartialEq, Eq, Validate, ToSchema)]
pub struct NewTask {
    #[validate(length(max = 150, message = "Longer than maximum length 150."))]
    #[schema(max_length = 150)]
    pub title: String,
    #[validate(length(max = 500, message = "Longer than maximum length 500."))]
    #[schema(max_length = 500)]
    pub description: Option<String>,
    #[schema(default = false)]
    pub done: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            done: false,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct TaskPatch {
    #[schema(max_length = 150)]
    pub title: Option<String>,
    /// `Some(None)` clears the description
    #[schema(value_type = Option<String>, max_length = 500)]
    pub description: Option<Option<String>>,
    pub done: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }
}

impl Task {
    /// Overwrite every mutable field
    pub fn replace_with(&mut self, input: NewTask) {
        self.title = input.title;
        self.description = input.description;
        self.done = input.done;
    }

    /// Apply only the fields present in the patch
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
    }
}

/// Body returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    /// Snapshot of the task as it was before deletion
    pub task: Task,
}

impl DeleteResponse {
    pub fn new(task: Task) -> Self {
        Self {
            message: TASK_DELETED.to_string(),
            task,
        }
    }
}

/// `{"error": "..."}` body used by the task endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
