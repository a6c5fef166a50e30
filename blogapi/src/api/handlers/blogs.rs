use crate::api::models::blogs::{BlogRequest, BlogResponse, Envelope};
use crate::db::errors::DbError;
use crate::db::handlers::{Blogs, Repository, blogs::BlogFilter};
use crate::db::models::blogs::{BlogCreateDBRequest, BlogUpdateDBRequest};
use crate::errors::{Error, ErrorBody, Result};
use crate::{AppState, types::BlogId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Number of rows returned by the list endpoint; not caller-configurable.
pub const LIST_LIMIT: i64 = 100;

#[utoipa::path(
    post,
    path = "/blog",
    tag = "Blog",
    summary = "Create blog",
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Blog created", body = Envelope<BlogResponse>),
        (status = 400, description = "Request body is not valid JSON"),
        (status = 422, description = "Missing or ill-typed field in request body"),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_blog(
    State(state): State<AppState>,
    Json(request): Json<BlogRequest>,
) -> Result<(StatusCode, Json<Envelope<BlogResponse>>)> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let blog = Blogs::new(&mut tx).create(&BlogCreateDBRequest::from(request)).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tracing::info!(blog_id = blog.id, "Created blog");
    Ok((StatusCode::CREATED, Json(Envelope::created(BlogResponse::from(blog)))))
}

#[utoipa::path(
    get,
    path = "/blog",
    tag = "Blog",
    summary = "List blogs",
    description = "Returns at most 100 blogs, ordered by id. An empty list is a successful response.",
    responses(
        (status = 200, description = "List of blogs", body = Envelope<Vec<BlogResponse>>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Envelope<Vec<BlogResponse>>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut pool_conn);

    let blogs = repo.list(&BlogFilter::new(0, LIST_LIMIT)).await?;

    Ok(Json(Envelope::success(blogs.into_iter().map(BlogResponse::from).collect())))
}

#[utoipa::path(
    get,
    path = "/blog/{id}",
    tag = "Blog",
    summary = "Get blog",
    responses(
        (status = 200, description = "Blog details", body = Envelope<BlogResponse>),
        (status = 400, description = "The id is not an integer"),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    params(
        ("id" = i64, Path, description = "Blog ID")
    )
)]
#[tracing::instrument(skip_all, fields(blog_id = id))]
pub async fn get_blog(State(state): State<AppState>, Path(id): Path<BlogId>) -> Result<Json<Envelope<BlogResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut pool_conn);

    match repo.get_by_id(id).await? {
        Some(blog) => Ok(Json(Envelope::success(BlogResponse::from(blog)))),
        None => Err(Error::blog_not_found(id)),
    }
}

#[utoipa::path(
    put,
    path = "/blog/{id}",
    tag = "Blog",
    summary = "Update blog",
    description = "Overwrites title and body. The id never changes.",
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = Envelope<BlogResponse>),
        (status = 400, description = "Request body is not valid JSON, or the id is not an integer"),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 422, description = "Missing or ill-typed field in request body"),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    params(
        ("id" = i64, Path, description = "Blog ID")
    )
)]
#[tracing::instrument(skip_all, fields(blog_id = id))]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<BlogId>,
    Json(request): Json<BlogRequest>,
) -> Result<Json<Envelope<BlogResponse>>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let blog = match Blogs::new(&mut tx).update(id, &BlogUpdateDBRequest::from(request)).await {
        Ok(blog) => blog,
        // Nothing was written; the transaction rolls back on drop
        Err(DbError::NotFound) => return Err(Error::blog_not_found(id)),
        Err(e) => return Err(e.into()),
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(Envelope::updated(BlogResponse::from(blog))))
}

#[utoipa::path(
    delete,
    path = "/blog/{id}",
    tag = "Blog",
    summary = "Delete blog",
    responses(
        (status = 200, description = "Blog deleted; data is null", body = Envelope<Option<BlogResponse>>),
        (status = 400, description = "The id is not an integer"),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    params(
        ("id" = i64, Path, description = "Blog ID")
    )
)]
#[tracing::instrument(skip_all, fields(blog_id = id))]
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<BlogId>,
) -> Result<Json<Envelope<Option<BlogResponse>>>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    if !Blogs::new(&mut tx).delete(id).await? {
        return Err(Error::blog_not_found(id));
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tracing::info!("Deleted blog");
    Ok(Json(Envelope::deleted()))
}

#[cfg(test)]
mod tests {
    use super::LIST_LIMIT;
    use crate::{
        api::models::blogs::{BlogResponse, Envelope, Message},
        db::{
            handlers::{Blogs, Repository},
            models::blogs::BlogCreateDBRequest,
        },
        errors::ErrorBody,
        test_utils::*,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_blog_lifecycle_example() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let response = app.post("/blog").json(&json!({"title": "A", "body": "B"})).await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({"message": "created", "data": {"id": 1, "title": "A", "body": "B"}}));

        let response = app.get("/blog/1").await;
        response.assert_status_ok();
        response.assert_json(&json!({"message": "success", "data": {"id": 1, "title": "A", "body": "B"}}));

        let response = app.delete("/blog/1").await;
        response.assert_status_ok();
        response.assert_json(&json!({"message": "deleted", "data": null}));

        let response = app.get("/blog/1").await;
        response.assert_status_not_found();
        response.assert_json(&json!({"detail": "The blog with id: 1 not found"}));
    }

    #[test_log::test(tokio::test)]
    async fn test_create_then_get_returns_same_content() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let cases = [("Hello", "World"), ("", ""), ("unicode ✓", "multi\nline body")];
        for (title, body) in cases {
            let response = app.post("/blog").json(&json!({"title": title, "body": body})).await;
            response.assert_status(StatusCode::CREATED);
            let created: Envelope<BlogResponse> = response.json();
            assert_eq!(created.message, Message::Created);

            let response = app.get(&format!("/blog/{}", created.data.id)).await;
            response.assert_status_ok();
            let fetched: Envelope<BlogResponse> = response.json();
            assert_eq!(fetched.message, Message::Success);
            assert_eq!(fetched.data, created.data);
            assert_eq!(fetched.data.title, title);
            assert_eq!(fetched.data.body, body);
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_get_never_created_id() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let response = app.get("/blog/42").await;
        response.assert_status_not_found();
        let error: ErrorBody = response.json();
        assert_eq!(error.detail, "The blog with id: 42 not found");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_existing_blog() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let created: Envelope<BlogResponse> = app.post("/blog").json(&json!({"title": "old", "body": "old body"})).await.json();
        let id = created.data.id;

        let response = app
            .put(&format!("/blog/{id}"))
            .json(&json!({"title": "new", "body": "new body"}))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"message": "updated", "data": {"id": id, "title": "new", "body": "new body"}}));

        let fetched: Envelope<BlogResponse> = app.get(&format!("/blog/{id}")).await.json();
        assert_eq!(fetched.data.id, id);
        assert_eq!(fetched.data.title, "new");
        assert_eq!(fetched.data.body, "new body");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_missing_blog_performs_no_write() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool.clone()).await;

        let response = app.put("/blog/7").json(&json!({"title": "ghost", "body": "ghost"})).await;
        response.assert_status_not_found();
        response.assert_json(&json!({"detail": "The blog with id: 7 not found"}));

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(Blogs::new(&mut conn).count().await.unwrap(), 0);
        drop(conn);

        let listed: Envelope<Vec<BlogResponse>> = app.get("/blog").await.json();
        assert!(listed.data.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_missing_blog() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let response = app.delete("/blog/99").await;
        response.assert_status_not_found();
        response.assert_json(&json!({"detail": "The blog with id: 99 not found"}));
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_only_removes_target() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let keep: Envelope<BlogResponse> = app.post("/blog").json(&json!({"title": "keep", "body": "k"})).await.json();
        let gone: Envelope<BlogResponse> = app.post("/blog").json(&json!({"title": "gone", "body": "g"})).await.json();

        app.delete(&format!("/blog/{}", gone.data.id)).await.assert_status_ok();
        app.get(&format!("/blog/{}", gone.data.id)).await.assert_status_not_found();
        app.get(&format!("/blog/{}", keep.data.id)).await.assert_status_ok();

        // A deleted id stays gone
        app.delete(&format!("/blog/{}", gone.data.id)).await.assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_list_empty_is_success() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let response = app.get("/blog").await;
        response.assert_status_ok();
        response.assert_json(&json!({"message": "success", "data": []}));
    }

    #[test_log::test(tokio::test)]
    async fn test_list_returns_created_blogs_and_is_idempotent() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        let mut created = Vec::new();
        for i in 0..5 {
            let response: Envelope<BlogResponse> = app
                .post("/blog")
                .json(&json!({"title": format!("post {i}"), "body": "body"}))
                .await
                .json();
            created.push(response.data);
        }

        let first: Envelope<Vec<BlogResponse>> = app.get("/blog").await.json();
        assert_eq!(first.message, Message::Success);
        assert_eq!(first.data, created);

        let second: Envelope<Vec<BlogResponse>> = app.get("/blog").await.json();
        assert_eq!(second.data, first.data);
    }

    #[test_log::test(tokio::test)]
    async fn test_list_is_capped() {
        let pool = create_test_pool().await;

        {
            let mut tx = pool.begin().await.unwrap();
            let mut repo = Blogs::new(&mut tx);
            for i in 0..(LIST_LIMIT + 5) {
                repo.create(&BlogCreateDBRequest {
                    title: format!("post {i}"),
                    body: String::new(),
                })
                .await
                .unwrap();
            }
            tx.commit().await.unwrap();
        }

        let app = create_test_app(pool).await;
        let listed: Envelope<Vec<BlogResponse>> = app.get("/blog").await.json();
        assert_eq!(listed.data.len(), LIST_LIMIT as usize);
        assert_eq!(listed.data.first().map(|b| b.title.as_str()), Some("post 0"));
    }

    #[test_log::test(tokio::test)]
    async fn test_malformed_requests_are_rejected() {
        let pool = create_test_pool().await;
        let app = create_test_app(pool).await;

        // Missing field
        let response = app.post("/blog").json(&json!({"title": "no body"})).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        // Wrong type
        let response = app.post("/blog").json(&json!({"title": 1, "body": "x"})).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        // Body that is not valid JSON
        let response = app
            .put("/blog/1")
            .bytes(r#"{"title": "cut off"#.into())
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Non-integer id
        let response = app.get("/blog/not-a-number").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let listed: Envelope<Vec<BlogResponse>> = app.get("/blog").await.json();
        assert!(listed.data.is_empty());
    }
}
