use ai_creator_common::{generator::ContentGenerator, model::ModelValidationError};
use ai_creator_store::store::{BlogStore, StoreError};
use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use json::{ErrorResponse, Json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

mod json;
mod query;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub store: Arc<BlogStore>,
    pub generator: Arc<ContentGenerator>,
}

impl ServerState {
    /// Fresh, empty state. The store synthesizes content with the same generator.
    #[must_use]
    pub fn new(generator: Arc<ContentGenerator>) -> Self {
        Self {
            store: Arc::new(BlogStore::new(Arc::clone(&generator))),
            generator,
        }
    }
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("Query string rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ModelValidationError),
    #[error("Requested blog id cannot name any blog post")]
    UnmatchedBlogId,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::UnmatchedBlogId
            | ServerError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::JsonRejection(_)
            | ServerError::QueryRejection(_)
            | ServerError::Validation(_)
            | ServerError::Store(StoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            ServerError::JsonResponse(_) | ServerError::Store(StoreError::Poisoned) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The short message clients see in the `error` field.
    fn summary(&self) -> String {
        match self {
            ServerError::Validation(err) | ServerError::Store(StoreError::Validation(err)) => {
                err.to_string()
            }
            // `/blogs/{id}` is the only route with a path parameter.
            ServerError::PathRejection(_)
            | ServerError::UnmatchedBlogId
            | ServerError::Store(StoreError::NotFound(_)) => "Blog post not found".to_owned(),
            ServerError::UnknownRoute(_) => self.to_string(),
            ServerError::JsonRejection(_) | ServerError::QueryRejection(_) => {
                "Invalid request".to_owned()
            }
            ServerError::JsonResponse(_) | ServerError::Store(StoreError::Poisoned) => {
                "Internal server error".to_owned()
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, %status, "Replying with error");
        } else {
            debug!(error = %self, %status, "Replying with error");
        }

        let error_response = ErrorResponse::new(self.summary(), self.to_string());
        (status, Json(error_response)).into_response()
    }
}
