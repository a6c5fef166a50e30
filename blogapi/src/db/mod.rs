//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with SQLite, following the
//! repository pattern:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   SQLite    │
//! └─────────────┘
//! ```
//!
//! # Sessions
//!
//! Repositories borrow a connection for the duration of one request. Writes go through a
//! transaction so that a handler which fails half way leaves nothing behind: dropping an
//! uncommitted [`sqlx::Transaction`] rolls it back, and dropping a pooled connection returns it
//! to the pool.
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = Blogs::new(&mut tx);
//! // ... operations ...
//! tx.commit().await?;
//! ```
//!
//! # Schema
//!
//! The `blogs` table is created by the bootstrap migration in `migrations/`, applied by
//! [`crate::migrator`] at startup.

pub mod errors;
pub mod handlers;
pub mod models;
