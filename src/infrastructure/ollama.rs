//! Ollama REST client
//!
//! API docs: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::config::Settings;
use crate::infrastructure::entities::{ChatRequest, ChatResponse, GenerateRequest};
use crate::infrastructure::traits::{BackendError, ModelBackend};
use async_trait::async_trait;
use di::{Ref, inject, injectable};
use log::debug;
use reqwest::Response;

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

#[injectable(ModelBackend)]
impl OllamaClient {
    #[inject]
    pub fn create(settings: Ref<Settings>) -> OllamaClient {
        OllamaClient::new(settings.ollama_host.clone())
    }
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> OllamaClient {
        let base_url: String = base_url.into();
        OllamaClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<Response, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ModelBackend for OllamaClient {
    async fn generate(&self, request: GenerateRequest) -> Result<(), BackendError> {
        let response = self.post("/api/generate", &request).await?;
        // drain so the connection can be reused
        response.bytes().await.map_err(BackendError::Decode)?;
        Ok(())
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        self.post("/api/chat", &request)
            .await?
            .json::<ChatResponse>()
            .await
            .map_err(BackendError::Decode)
    }
}
