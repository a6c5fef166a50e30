//! Database models for blog posts.

use crate::types::BlogId;
use serde::{Deserialize, Serialize};

/// Database representation of a row in `blogs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub body: String,
}

/// Request to insert a new blog post; the id is assigned by the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCreateDBRequest {
    pub title: String,
    pub body: String,
}

/// Request to overwrite the mutable columns of an existing blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogUpdateDBRequest {
    pub title: String,
    pub body: String,
}

/// Response from database after creating, reading or updating a blog post
pub type BlogDBResponse = Blog;
