//! Application state management.
//!
//! This module defines the shared application state passed to routers.
//! The state contains:
//! - Configuration
//! - The PostgreSQL connection pool

/// Shared application state.
///
/// Built once in `main` and cloned into routers (the connection pool is
/// reference-counted, so clones are cheap).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
