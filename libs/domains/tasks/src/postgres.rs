use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{NewTask, Task},
    repository::TaskRepository,
};

/// PostgreSQL-backed task repository
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let active_model: entity::ActiveModel = task.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => TaskError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(task_id = id, "Updated task");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> TaskResult<usize> {
        let count = entity::Entity::find().count(&self.db).await?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i32, title: &str, done: bool) -> entity::Model {
        entity::Model {
            id,
            title: title.to_string(),
            description: None,
            done,
        }
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "A", false)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task = repo.create(NewTask::new("A")).await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "A");
        assert_eq!(task.description, None);
        assert!(!task.done);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert_eq!(repo.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "A", false), model(2, "B", true)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let tasks = repo.list().await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, 2);
        assert!(tasks[1].done);
    }

    #[tokio::test]
    async fn test_save_vanished_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let result = repo.save(model(7, "gone", true).into()).await;

        assert!(matches!(result, Err(TaskError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.delete(3).await.unwrap());
        assert!(!repo.delete(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_becomes_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("relation \"task\" does not exist".to_string())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let result = repo.list().await;

        assert!(matches!(result, Err(TaskError::Database(_))));
    }
}
