//! DI "Interfaces"

use crate::infrastructure::traits::BackendError;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),

    #[error("prompt must not be empty")]
    InvalidPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    AlreadyLoaded,
    Loaded,
}

impl LoadStatus {
    pub fn message(self) -> &'static str {
        match self {
            LoadStatus::AlreadyLoaded => "Model is already loaded",
            LoadStatus::Loaded => "Model loaded successfully",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadStatus {
    NotLoaded,
    Unloaded,
}

impl UnloadStatus {
    pub fn message(self) -> &'static str {
        match self {
            UnloadStatus::NotLoaded => "No model is currently loaded",
            UnloadStatus::Unloaded => "Model unloaded successfully",
        }
    }
}

impl fmt::Display for UnloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Mediates access to a single model-serving backend.
///
/// Implementations track whether the backend currently holds the model warm so
/// callers never issue redundant load calls. The tracking is a cost-avoidance
/// cache: concurrent callers may both warm the model up.
#[async_trait]
pub trait ModelLifecycle: Send + Sync {
    /// Whether a warm session is believed to exist.
    fn is_loaded(&self) -> bool;

    /// Warms the model up unless it is already loaded.
    ///
    /// Returns `Err` if the backend could not be reached; the session state is unchanged then.
    async fn ensure_loaded(&self) -> Result<LoadStatus, ModelError>;

    /// Asks the backend to release the model immediately.
    ///
    /// Returns `Err` if the backend could not be reached; the model is still considered loaded.
    async fn unload(&self) -> Result<UnloadStatus, ModelError>;

    /// Sends a single-turn conversation and returns the reply verbatim.
    ///
    /// Loads the model first if needed. Returns `Err(ModelError::InvalidPrompt)` without
    /// touching the backend if `prompt` is blank.
    async fn ask(&self, prompt: &str) -> Result<String, ModelError>;
}
