//! API request/response models for blog posts.

use crate::db::models::blogs::{BlogCreateDBRequest, BlogDBResponse, BlogUpdateDBRequest};
use crate::types::BlogId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating or replacing a blog post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogRequest {
    #[schema(example = "Hello world")]
    pub title: String,
    #[schema(example = "My first post")]
    pub body: String,
}

/// A blog post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlogResponse {
    /// Storage-assigned identifier, immutable once created
    #[schema(example = 1)]
    pub id: BlogId,
    pub title: String,
    pub body: String,
}

/// Outcome reported in the `message` field of every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Message {
    Created,
    Success,
    Updated,
    Deleted,
}

/// The `{message, data}` wrapper around every successful blog response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub message: Message,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn created(data: T) -> Self {
        Self {
            message: Message::Created,
            data,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            message: Message::Success,
            data,
        }
    }

    pub fn updated(data: T) -> Self {
        Self {
            message: Message::Updated,
            data,
        }
    }
}

impl Envelope<Option<BlogResponse>> {
    /// Deleted entities carry no payload: `data` serializes as `null`
    pub fn deleted() -> Self {
        Self {
            message: Message::Deleted,
            data: None,
        }
    }
}

impl From<BlogDBResponse> for BlogResponse {
    fn from(blog: BlogDBResponse) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            body: blog.body,
        }
    }
}

impl From<BlogRequest> for BlogCreateDBRequest {
    fn from(request: BlogRequest) -> Self {
        Self {
            title: request.title,
            body: request.body,
        }
    }
}

impl From<BlogRequest> for BlogUpdateDBRequest {
    fn from(request: BlogRequest) -> Self {
        Self {
            title: request.title,
            body: request.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let blog = BlogResponse {
            id: 1,
            title: "A".to_string(),
            body: "B".to_string(),
        };

        let value = serde_json::to_value(Envelope::created(blog)).unwrap();
        assert_eq!(
            value,
            json!({"message": "created", "data": {"id": 1, "title": "A", "body": "B"}})
        );
    }

    #[test]
    fn test_deleted_envelope_has_null_data() {
        let value = serde_json::to_value(Envelope::deleted()).unwrap();
        assert_eq!(value, json!({"message": "deleted", "data": null}));
    }

    #[test]
    fn test_list_envelope() {
        let value = serde_json::to_value(Envelope::success(Vec::<BlogResponse>::new())).unwrap();
        assert_eq!(value, json!({"message": "success", "data": []}));
    }

    #[test]
    fn test_request_requires_both_fields() {
        assert!(serde_json::from_value::<BlogRequest>(json!({"title": "only"})).is_err());
        assert!(serde_json::from_value::<BlogRequest>(json!({"title": 1, "body": "x"})).is_err());

        let request: BlogRequest = serde_json::from_value(json!({"title": "", "body": ""})).unwrap();
        assert!(request.title.is_empty());
    }
}
