use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;

pub mod assessment;
pub mod model;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// All API routes. DI is attached by the caller with `with_provider`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", model::router().merge(assessment::router()))
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Serialize, Debug)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Json<MessageBody> {
        Json(MessageBody {
            message: message.into(),
        })
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Errors as seen by HTTP clients. The underlying cause is logged, never returned.
#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    BadRequest(&'static str),
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED),
            ApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            ApiError::Internal(error) => (StatusCode::INTERNAL_SERVER_ERROR, error),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Fallback for routes that only accept POST.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
