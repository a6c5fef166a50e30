//! Database repository for blog posts.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::blogs::{Blog, BlogCreateDBRequest, BlogDBResponse, BlogUpdateDBRequest},
};
use crate::types::BlogId;
use sqlx::SqliteConnection;
use tracing::instrument;

/// Filter for listing blog posts
#[derive(Debug, Clone)]
pub struct BlogFilter {
    pub skip: i64,
    pub limit: i64,
}

impl BlogFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

pub struct Blogs<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Blogs<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Count all rows in the table
    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Blogs<'c> {
    type CreateRequest = BlogCreateDBRequest;
    type UpdateRequest = BlogUpdateDBRequest;
    type Response = BlogDBResponse;
    type Id = BlogId;
    type Filter = BlogFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (title, body)
            VALUES (?, ?)
            RETURNING id, title, body
            "#,
        )
        .bind(&request.title)
        .bind(&request.body)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(blog)
    }

    #[instrument(skip(self), fields(blog_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let blog = sqlx::query_as::<_, Blog>("SELECT id, title, body FROM blogs WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(blog)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let blogs = sqlx::query_as::<_, Blog>("SELECT id, title, body FROM blogs ORDER BY id LIMIT ? OFFSET ?")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        tracing::debug!("Retrieved {} blogs", blogs.len());

        Ok(blogs)
    }

    #[instrument(skip(self), fields(blog_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(blog_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Single statement: the existence check and the write cannot interleave with another writer
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs SET
                title = ?,
                body = ?
            WHERE id = ?
            RETURNING id, title, body
            "#,
        )
        .bind(&request.title)
        .bind(&request.body)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(blog)
    }
}
