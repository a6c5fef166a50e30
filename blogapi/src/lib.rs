//! # blogapi: CRUD service for blog posts
//!
//! `blogapi` exposes a small HTTP API for creating, listing, reading, updating and deleting
//! blog posts. Each post is a single row (`id`, `title`, `body`) in a SQLite table.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! [sqlx](https://github.com/launchbadge/sqlx) with SQLite for persistence.
//!
//! ### Request Flow
//!
//! A request to `/blog` or `/blog/{id}` reaches one of the handlers in
//! [`api::handlers::blogs`]. The handler takes a scoped session from the pool held in
//! [`AppState`] (a plain connection for reads, a transaction for writes), performs a single
//! operation through the [`db::handlers::Blogs`] repository and answers with an
//! [`Envelope`](api::models::blogs::Envelope) of the form `{"message": ..., "data": ...}`.
//! A missing row becomes a `404` with body `{"detail": "The blog with id: {id} not found"}`.
//!
//! ### Lifecycle
//!
//! [`Application::new`] opens the pool (creating the database file if needed), runs the
//! bootstrap migration and builds the router. [`Application::serve`] binds to the configured
//! address, serves until the shutdown future resolves, then closes the pool and flushes
//! telemetry. There is no global state: the pool is owned by the application and shared with
//! handlers through [`AppState`].
//!
//! ## Configuration
//!
//! See [`config`] for the YAML file format and environment variable overrides.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
mod types;

use crate::{
    api::handlers::blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog},
    config::CorsOrigin,
    openapi::ApiDoc,
};
use axum::{Json, Router, http, routing::get};
use bon::Builder;
pub use config::Config;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::BlogId;

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}

/// Get the blogapi database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Open the connection pool described by `config` and apply the bootstrap migration.
///
/// The database file is created when it does not exist yet.
#[instrument(skip_all)]
pub async fn setup_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let settings = &config.database.pool;

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime());

    // An in-memory database lives only as long as its connection, so keep exactly one open
    if config.database.is_in_memory() {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>);
    }

    let pool = pool_options.connect_with(options).await?;

    migrator().run(&pool).await?;
    info!("Database ready");

    Ok(pool)
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    // tower-http rejects "*" inside an origin list, so a wildcard anywhere means any origin
    let allow_origin = if cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<http::HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(cors_config.allow_credentials);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// - Blog CRUD routes (`/blog`, `/blog/{id}`)
/// - Health check (`/healthz`)
/// - OpenAPI document and Scalar reference (`/api-docs/openapi.json`, `/docs`)
/// - CORS and tracing middleware
///
/// # Errors
///
/// Returns an error if the CORS configuration cannot be turned into header values.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/blog", get(list_blogs).post(create_blog))
        .route("/blog/{id}", get(get_blog).put(update_blog).delete(delete_blog))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let router = router.layer(create_cors_layer(&state.config)?);

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The blog service: router, shared state and the pool it owns.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] opens the pool, runs the migration and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests finish, then the pool
///    is closed and telemetry is flushed
pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application around an existing pool, or open one from `config` when `None`.
    ///
    /// The migration is applied either way; running it against an up-to-date database is a no-op.
    pub async fn new_with_pool(config: Config, pool: Option<SqlitePool>) -> anyhow::Result<Self> {
        debug!("Starting blogapi with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => {
                migrator().run(&pool).await?;
                pool
            }
            None => setup_database(&config).await?,
        };

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            app_state,
            config,
            pool,
        })
    }

    /// Shared state handed to every handler
    pub fn state(&self) -> &AppState {
        &self.app_state
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "blogapi listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        // Shutdown telemetry
        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
