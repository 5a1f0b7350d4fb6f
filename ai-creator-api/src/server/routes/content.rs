use crate::server::{Result, ServerError, ServerRouter, json::Json};
use ai_creator_common::{
    generator::ContentGenerator,
    model::{ModelValidationError, blog::GenerateBlogContent},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const GITHUB_STUB_MESSAGE: &str =
    "GitHub integration coming soon! Your blog posts are currently stored locally.";

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(generate_blog)
        .typed_post(push_to_github)
}

#[derive(Serialize)]
struct GeneratedContentResponse {
    message: &'static str,
    topic: String,
    content: String,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/generate-blog", rejection(ServerError))]
struct GenerateBlogPath();

async fn generate_blog(
    GenerateBlogPath(): GenerateBlogPath,
    State(generator): State<Arc<ContentGenerator>>,
    Json(request): Json<GenerateBlogContent>,
) -> Result<Json<GeneratedContentResponse>> {
    let topic = request.topic().map_err(ModelValidationError::from)?;
    let content = generator.generate(&topic, None);

    Ok(Json(GeneratedContentResponse {
        message: "Blog content generated successfully",
        topic: topic.into_inner(),
        content,
    }))
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/push-to-github", rejection(ServerError))]
struct PushToGithubPath();

/// Accepts any body and does nothing.
async fn push_to_github(PushToGithubPath(): PushToGithubPath) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: GITHUB_STUB_MESSAGE,
    })
}
