use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{NewTask, Task};

/// Sea-ORM Entity for the task table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            done: model.done,
        }
    }
}

// Insert: the id comes from the SERIAL column
impl From<NewTask> for ActiveModel {
    fn from(input: NewTask) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            done: Set(input.done),
        }
    }
}

// Update: every mutable column is written, keyed on the unchanged id
impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Unchanged(task.id),
            title: Set(task.title),
            description: Set(task.description),
            done: Set(task.done),
        }
    }
}
