use crate::server::{ServerError, ServerRouter, json::Json};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use serde_json::{Value, json};

mod blogs;
mod content;

pub const SERVICE_BANNER: &str = "AI Creator Backend is online!";

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(index)
        .merge(blogs::routes())
        .merge(content::routes())
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/", rejection(ServerError))]
struct IndexPath();

async fn index(IndexPath(): IndexPath) -> Json<Value> {
    Json(json!({
        "message": SERVICE_BANNER,
        "endpoints": {
            "POST /create-blog": "Create a new blog post",
            "GET /blogs": "List all blog posts",
            "GET /blogs/:id": "Get a specific blog post",
            "POST /publish-blog": "Publish a blog post",
            "POST /generate-blog": "Generate blog content (legacy)",
            "POST /push-to-github": "Push blog posts to GitHub (not yet available)",
        }
    }))
}
