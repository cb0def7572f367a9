use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Task API",
        version = "0.1.0",
        description = "CRUD API for managing tasks"
    ),
    nest(
        (path = "/tasks", api = domain_tasks::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/tasks"));
        assert!(paths.iter().any(|p| p.as_str() == "/tasks/{id}"));
    }
}
