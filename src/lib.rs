//! Career assessment quiz backend on a local Ollama model - Library exports for testing
//!
//! (c) Softlandia 2025

pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

use crate::config::Settings;
use crate::core::lifecycle::ModelManager;
use crate::infrastructure::ollama::OllamaClient;
use di::{Injectable, ServiceCollection, existing_as_self};

/// Production service registrations.
pub fn services(settings: Settings) -> ServiceCollection {
    let mut services = ServiceCollection::new();
    services
        .add(existing_as_self(settings))
        .add(OllamaClient::singleton())
        .add(ModelManager::singleton());
    services
}
