//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Blogs** (`/blog`, `/blog/{id}`): blog post management
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. The document is served at
//! `/api-docs/openapi.json` and rendered at `/docs` when the server is running.

pub mod handlers;
pub mod models;
