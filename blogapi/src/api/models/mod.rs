//! API request and response data models.
//!
//! These types define the public wire contract and are deliberately separate from the
//! database models so storage and API representations can evolve independently. All models
//! are annotated with `utoipa` for the generated OpenAPI document.
//!
//! - [`blogs`]: blog post payloads and the `{message, data}` envelope

pub mod blogs;
