//! Model lifecycle endpoints

use crate::api::{ApiError, MessageBody, method_not_allowed};
use crate::core::traits::ModelLifecycle;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use di_axum::Inject;
use log::{error, info};

pub const LOAD_FAILED: &str = "Failed to load the model";
pub const UNLOAD_FAILED: &str = "Failed to unload the model";
pub const PROMPT_FAILED: &str = "Failed to prompt the model";

pub fn router() -> Router {
    Router::new()
        .route("/loadModel", post(load_model).fallback(method_not_allowed))
        .route("/unloadModel", post(unload_model).fallback(method_not_allowed))
        .route("/promptLLM", post(prompt_model).fallback(method_not_allowed))
}

async fn load_model(
    Inject(lifecycle): Inject<dyn ModelLifecycle>,
) -> Result<Json<MessageBody>, ApiError> {
    match lifecycle.ensure_loaded().await {
        Ok(status) => {
            info!("{status}");
            Ok(MessageBody::new(status.message()))
        }
        Err(e) => {
            error!("Error loading the model: {e}");
            Err(ApiError::Internal(LOAD_FAILED))
        }
    }
}

async fn unload_model(
    Inject(lifecycle): Inject<dyn ModelLifecycle>,
) -> Result<Json<MessageBody>, ApiError> {
    match lifecycle.unload().await {
        Ok(status) => {
            info!("{status}");
            Ok(MessageBody::new(status.message()))
        }
        Err(e) => {
            error!("Error unloading the model: {e}");
            Err(ApiError::Internal(UNLOAD_FAILED))
        }
    }
}

async fn prompt_model(
    Inject(lifecycle): Inject<dyn ModelLifecycle>,
    payload: Result<Json<schemas::Prompt>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    // every failure on this route is reported the same way
    let prompt = match payload {
        Ok(Json(schemas::Prompt { prompt })) => prompt.unwrap_or_default(),
        Err(rejection) => {
            error!("Error prompting the model: {rejection}");
            return Err(ApiError::Internal(PROMPT_FAILED));
        }
    };

    lifecycle
        .ask(&prompt)
        .await
        .map(MessageBody::new)
        .map_err(|e| {
            error!("Error prompting the model: {e}");
            ApiError::Internal(PROMPT_FAILED)
        })
}

pub mod schemas {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Prompt {
        #[serde(default)]
        pub prompt: Option<String>,
    }
}
