//! Model lifecycle manager.

use crate::config::Settings;
use crate::core::traits::{LoadStatus, ModelError, ModelLifecycle, UnloadStatus};
use crate::infrastructure::entities::{ChatMessage, ChatRequest, GenerateRequest, KeepAlive};
use crate::infrastructure::traits::ModelBackend;
use async_trait::async_trait;
use di::{Ref, inject, injectable};
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct ModelManager {
    backend: Ref<dyn ModelBackend>,
    model: String,
    keep_alive: String,
    loaded: AtomicBool,
}

#[injectable(ModelLifecycle)]
impl ModelManager {
    #[inject]
    pub fn create(backend: Ref<dyn ModelBackend>, settings: Ref<Settings>) -> ModelManager {
        ModelManager::new(backend, settings.model.clone(), settings.keep_alive.clone())
    }
}

impl ModelManager {
    pub fn new(
        backend: Ref<dyn ModelBackend>,
        model: impl Into<String>,
        keep_alive: impl Into<String>,
    ) -> ModelManager {
        ModelManager {
            backend,
            model: model.into(),
            keep_alive: keep_alive.into(),
            loaded: AtomicBool::new(false),
        }
    }

    fn warm(&self) -> KeepAlive {
        KeepAlive::For(self.keep_alive.clone())
    }
}

#[async_trait]
impl ModelLifecycle for ModelManager {
    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    async fn ensure_loaded(&self) -> Result<LoadStatus, ModelError> {
        if self.is_loaded() {
            return Ok(LoadStatus::AlreadyLoaded);
        }

        info!("Loading model {} (keep alive {})", self.model, self.keep_alive);
        self.backend
            .generate(GenerateRequest::empty(&self.model, self.warm()))
            .await
            .inspect_err(|e| error!("Failed to load model {}: {e}", self.model))?;

        self.loaded.store(true, Ordering::SeqCst);
        info!("Model {} loaded", self.model);
        Ok(LoadStatus::Loaded)
    }

    async fn unload(&self) -> Result<UnloadStatus, ModelError> {
        if !self.is_loaded() {
            return Ok(UnloadStatus::NotLoaded);
        }

        info!("Unloading model {}", self.model);
        // on failure the flag stays set: the backend may well still hold the model
        self.backend
            .generate(GenerateRequest::empty(&self.model, KeepAlive::Release))
            .await
            .inspect_err(|e| error!("Failed to unload model {}: {e}", self.model))?;

        self.loaded.store(false, Ordering::SeqCst);
        info!("Model {} unloaded", self.model);
        Ok(UnloadStatus::Unloaded)
    }

    async fn ask(&self, prompt: &str) -> Result<String, ModelError> {
        if prompt.trim().is_empty() {
            return Err(ModelError::InvalidPrompt);
        }

        self.ensure_loaded().await?;

        let response = self
            .backend
            .chat(ChatRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage::user(prompt)],
                keep_alive: self.warm(),
                stream: false,
            })
            .await?;

        Ok(response.message.content)
    }
}
