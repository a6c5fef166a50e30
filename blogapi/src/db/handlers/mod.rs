//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed SQLx connection (plain or inside a transaction), runs the
//! queries for one table and returns models from [`crate::db::models`].
//!
//! - [`Blogs`]: blog post CRUD
//!
//! ```ignore
//! use blogapi::db::handlers::{Blogs, Repository};
//!
//! async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let blog = Blogs::new(&mut tx).create(&create_request).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod blogs;
pub mod repository;

pub use blogs::Blogs;
pub use repository::Repository;
