//! Test utilities shared by the unit and HTTP-level tests.

use crate::{Config, config::PoolSettings};
use axum_test::TestServer;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::time::Duration;

/// Open an in-memory database with the bootstrap migration applied.
///
/// The pool holds exactly one connection that never expires, since every SQLite in-memory
/// connection owns a separate database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    crate::migrator().run(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    };
    config.database.url = "sqlite::memory:".to_string();
    config.database.pool = PoolSettings {
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    config
}

pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}
