use axum::Router;

pub mod health;
pub mod tasks;

/// Creates the API routes.
///
/// This function takes a reference to AppState and initializes all services.
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/tasks", tasks::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`. The /ready endpoint pings the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use domain_tasks::entity;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state_with_rows(rows: Vec<entity::Model>) -> AppState {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();

        AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgres://localhost/tasks"),
                server: ServerConfig::default(),
                environment: Environment::Development,
                run_migrations: false,
            },
            db,
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_tasks_mounted_under_prefix() {
        let state = state_with_rows(vec![entity::Model {
            id: 1,
            title: "A".to_string(),
            description: None,
            done: false,
        }]);
        let app = axum_helpers::create_router::<crate::openapi::ApiDoc>(
            routes(&state),
            &state.config.server,
        )
        .unwrap();

        let (status, body) = get(app, "/tasks").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": 1, "title": "A", "description": null, "done": false}])
        );
    }

    #[tokio::test]
    async fn test_unknown_path_uses_json_fallback() {
        let state = state_with_rows(vec![]);
        let app = axum_helpers::create_router::<crate::openapi::ApiDoc>(
            routes(&state),
            &state.config.server,
        )
        .unwrap();

        let (status, body) = get(app, "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
