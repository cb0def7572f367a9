use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};

// Import database config from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL is not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let run_migrations = env_parse_or_default("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/tasks")),
                ("RUN_MIGRATIONS", None),
                ("PORT", None),
                ("HOST", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "task_api");
                assert_eq!(config.database.url(), "postgres://localhost/tasks");
                assert_eq!(config.server.port, 8080);
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_from_env_migrations_can_be_disabled() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/tasks")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                assert!(!Config::from_env().unwrap().run_migrations);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_flag() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/tasks")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("RUN_MIGRATIONS"));
            },
        );
    }
}
