use crate::server::{Result, ServerError, ServerRouter, json::Json, query::Query};
use ai_creator_common::model::{
    Id,
    blog::{
        BlogPost, BlogPostMarker, BlogPostSummary, CreateBlogPost, PublishBlogPost,
        PublishedBlogPost,
    },
};
use ai_creator_store::store::BlogStore;
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(create_blog)
        .typed_get(list_blogs)
        .typed_get(get_blog)
        .typed_post(publish_blog)
}

#[derive(Serialize)]
struct BlogResponse<T> {
    message: &'static str,
    blog: T,
}

#[derive(Serialize)]
struct BlogListResponse {
    message: String,
    blogs: Vec<BlogPostSummary>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/create-blog", rejection(ServerError))]
struct CreateBlogPath();

async fn create_blog(
    CreateBlogPath(): CreateBlogPath,
    State(store): State<Arc<BlogStore>>,
    Json(post): Json<CreateBlogPost>,
) -> Result<(StatusCode, Json<BlogResponse<BlogPost>>)> {
    let blog = store.create(post)?;
    info!(id = %blog.id, topic = %blog.topic, "Created blog post");

    Ok((
        StatusCode::CREATED,
        Json(BlogResponse {
            message: "Blog post created successfully!",
            blog,
        }),
    ))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/blogs", rejection(ServerError))]
struct ListBlogsPath();

#[derive(Deserialize)]
struct ListBlogsQuery {
    published: Option<String>,
}

async fn list_blogs(
    ListBlogsPath(): ListBlogsPath,
    State(store): State<Arc<BlogStore>>,
    Query(ListBlogsQuery { published }): Query<ListBlogsQuery>,
) -> Result<Json<BlogListResponse>> {
    let published_only = published.as_deref() == Some("true");
    let blogs = store.list(published_only)?;

    Ok(Json(BlogListResponse {
        message: format!("Found {} blog post(s)", blogs.len()),
        blogs,
    }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/blogs/{id}", rejection(ServerError))]
struct GetBlogPath {
    id: Id<BlogPostMarker>,
}

#[axum::debug_handler]
async fn get_blog(
    GetBlogPath { id }: GetBlogPath,
    State(store): State<Arc<BlogStore>>,
) -> Result<Json<BlogResponse<BlogPost>>> {
    let blog = store.get(id)?;

    Ok(Json(BlogResponse {
        message: "Blog post retrieved successfully",
        blog,
    }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/publish-blog", rejection(ServerError))]
struct PublishBlogPath();

async fn publish_blog(
    PublishBlogPath(): PublishBlogPath,
    State(store): State<Arc<BlogStore>>,
    Json(request): Json<PublishBlogPost>,
) -> Result<Json<BlogResponse<PublishedBlogPost>>> {
    let id = request.id()?.ok_or(ServerError::UnmatchedBlogId)?;
    let blog = store.publish(id)?;

    Ok(Json(BlogResponse {
        message: "Blog post published successfully!",
        blog,
    }))
}
