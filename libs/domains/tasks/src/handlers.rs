use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, IdPathRejection, JsonPayload, JsonPayloadRejection,
    errors::responses::{InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{DeleteResponse, ErrorBody, NewTask, Task, TaskPatch};
use crate::repository::TaskRepository;
use crate::schema::{FieldErrors, parse_new_task, parse_task_patch};
use crate::service::TaskService;

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks,
        create_task,
        get_task,
        replace_task,
        patch_task,
        delete_task,
    ),
    components(
        schemas(Task, NewTask, TaskPatch, DeleteResponse, ErrorBody, FieldErrors),
        responses(NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the task router with all HTTP endpoints
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/{id}",
            get(get_task)
                .put(replace_task)
                .patch(patch_task)
                .delete(delete_task),
        )
        .with_state(shared_service)
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks ordered by id", body = Vec<Task>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, description = "Bad content type, malformed JSON or invalid fields", body = FieldErrors),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    payload: Result<JsonPayload, JsonPayloadRejection>,
) -> TaskResult<impl IntoResponse> {
    let JsonPayload(body) = payload?;
    let input = parse_new_task(body)?;

    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, description = "Task not found", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    id: Result<IdPath, IdPathRejection>,
) -> TaskResult<Json<Task>> {
    let IdPath(id) = id?;
    let task = service.get_task(id).await?;
    Ok(Json(task))
}

/// Replace a task. Omitted `description` becomes null and omitted `done` becomes false.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = NewTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Bad content type, malformed JSON or invalid fields", body = FieldErrors),
        (status = 404, description = "Task not found", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    id: Result<IdPath, IdPathRejection>,
    payload: Result<JsonPayload, JsonPayloadRejection>,
) -> TaskResult<Json<Task>> {
    let IdPath(id) = id?;
    // A missing task is reported before any problem with the body
    let current = service.get_task(id).await?;
    let JsonPayload(body) = payload?;
    let input = parse_new_task(body)?;

    let task = service.replace_task(current, input).await?;
    Ok(Json(task))
}

/// Update only the supplied fields of a task
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Bad content type, malformed JSON or invalid fields", body = FieldErrors),
        (status = 404, description = "Task not found", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    id: Result<IdPath, IdPathRejection>,
    payload: Result<JsonPayload, JsonPayloadRejection>,
) -> TaskResult<Json<Task>> {
    let IdPath(id) = id?;
    let current = service.get_task(id).await?;
    let JsonPayload(body) = payload?;
    let patch = parse_task_patch(body)?;

    let task = service.patch_task(current, patch).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted successfully", body = DeleteResponse),
        (status = 404, description = "Task not found", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    id: Result<IdPath, IdPathRejection>,
) -> TaskResult<Json<DeleteResponse>> {
    let IdPath(id) = id?;
    let task = service.delete_task(id).await?;
    Ok(Json(DeleteResponse::new(task)))
}
