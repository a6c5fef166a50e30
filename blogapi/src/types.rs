//! Common type definitions.
//!
//! Entity IDs are storage-assigned integers wrapped in type aliases so that signatures say
//! which table they point into.

/// Identifier of a row in the `blogs` table, assigned by the database on insert.
pub type BlogId = i64;
