//! OpenAPI documentation for the blog API.

use crate::api::handlers::blogs;
use crate::api::models::blogs::{BlogRequest, BlogResponse, Message};
use crate::errors::ErrorBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "blogapi",
        description = "CRUD API for blog posts. Successful responses are wrapped in a `{message, data}` envelope."
    ),
    paths(
        blogs::create_blog,
        blogs::list_blogs,
        blogs::get_blog,
        blogs::update_blog,
        blogs::delete_blog,
    ),
    components(schemas(BlogRequest, BlogResponse, Message, ErrorBody)),
    tags(
        (name = "Blog", description = "Blog post management")
    )
)]
pub struct ApiDoc;
