//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities::{ChatRequest, ChatResponse, GenerateRequest};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("model server unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("model server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response from model server: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The model-serving process, reduced to the two calls this service needs.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Runs a generation. The output is discarded; this is only used to load or release the model.
    async fn generate(&self, request: GenerateRequest) -> Result<(), BackendError>;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError>;
}
