//! HTTP request handlers for all API endpoints.
//!
//! Each handler acquires a scoped database session from [`crate::AppState`], performs one
//! repository operation and wraps the result in an [`Envelope`](crate::api::models::blogs::Envelope).
//! Failures are returned as [`crate::errors::Error`], which converts to a status code and a
//! `{"detail": ...}` body.
//!
//! - [`blogs`]: blog post create, list, get, update and delete

pub mod blogs;
