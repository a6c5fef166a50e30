//! Database record models matching table schemas.
//!
//! Models here correspond one-to-one with table rows and derive `sqlx::FromRow`. They are kept
//! separate from the API models in [`crate::api::models`] so the storage and wire shapes can
//! evolve independently; conversions live on the API side:
//!
//! ```ignore
//! use blogapi::api::models::blogs::BlogResponse;
//! use blogapi::db::models::blogs::BlogDBResponse;
//!
//! let response = BlogResponse::from(db_blog);
//! ```

pub mod blogs;
