//! Tests for the model lifecycle manager against a recording backend.

mod common;

use career_quiz_api::core::lifecycle::ModelManager;
use career_quiz_api::core::traits::{LoadStatus, ModelError, ModelLifecycle, UnloadStatus};
use career_quiz_api::infrastructure::entities::ChatMessage;
use common::{BackendCall, FakeBackend, REPLY};
use di::Ref;
use std::sync::Arc;

fn manager(backend: &FakeBackend) -> ModelManager {
    ModelManager::new(Ref::new(backend.clone()), "llama3.2", "10m")
}

#[tokio::test]
async fn test_starts_unloaded() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);

    assert!(!manager.is_loaded());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_ensure_loaded_twice_warms_once() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);

    assert_eq!(manager.ensure_loaded().await.unwrap(), LoadStatus::Loaded);
    assert_eq!(
        manager.ensure_loaded().await.unwrap(),
        LoadStatus::AlreadyLoaded
    );

    assert!(manager.is_loaded());
    assert_eq!(
        backend.calls(),
        vec![BackendCall::Warm {
            model: "llama3.2".to_owned(),
            keep_alive: "10m".to_owned(),
        }]
    );
}

#[tokio::test]
async fn test_unload_when_never_loaded_is_noop() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);

    let status = manager.unload().await.unwrap();

    assert_eq!(status, UnloadStatus::NotLoaded);
    assert_eq!(status.message(), "No model is currently loaded");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_empty_prompt_is_rejected_without_backend_call() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);

    for prompt in ["", "   \n"] {
        let result = manager.ask(prompt).await;
        assert!(matches!(result, Err(ModelError::InvalidPrompt)));
    }

    assert!(backend.calls().is_empty());
    assert!(!manager.is_loaded());
}

#[tokio::test]
async fn test_ask_when_unloaded_warms_then_chats() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);

    let reply = manager.ask("Suggest a career").await.unwrap();

    assert_eq!(reply, REPLY);
    assert!(manager.is_loaded());
    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::Warm {
                model: "llama3.2".to_owned(),
                keep_alive: "10m".to_owned(),
            },
            BackendCall::Chat {
                model: "llama3.2".to_owned(),
                messages: vec![ChatMessage::user("Suggest a career")],
            },
        ]
    );
}

#[tokio::test]
async fn test_ask_when_loaded_only_chats() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);

    manager.ensure_loaded().await.unwrap();
    manager.ask("first").await.unwrap();
    manager.ask("second").await.unwrap();

    assert_eq!(backend.warm_ups(), 1);
    assert_eq!(backend.chats(), 2);
}

#[tokio::test]
async fn test_load_unload_load_round_trip() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);

    assert_eq!(manager.ensure_loaded().await.unwrap(), LoadStatus::Loaded);
    assert_eq!(manager.unload().await.unwrap(), UnloadStatus::Unloaded);
    assert!(!manager.is_loaded());
    assert_eq!(manager.ensure_loaded().await.unwrap(), LoadStatus::Loaded);

    assert!(manager.is_loaded());
    assert_eq!(backend.warm_ups(), 2);
    assert_eq!(backend.releases(), 1);
    assert_eq!(
        backend.calls()[1],
        BackendCall::Release {
            model: "llama3.2".to_owned()
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cold_loads_all_succeed() {
    let backend = FakeBackend::new();
    let manager = Arc::new(manager(&backend));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.ensure_loaded().await })
        })
        .collect();

    for handle in handles {
        let status = handle.await.unwrap().unwrap();
        assert!(matches!(
            status,
            LoadStatus::Loaded | LoadStatus::AlreadyLoaded
        ));
    }

    // racing callers may each warm up; that is accepted
    assert!(manager.is_loaded());
    assert!(backend.warm_ups() >= 1);
    assert!(backend.warm_ups() <= 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cold_asks_all_reply() {
    let backend = FakeBackend::new();
    let manager = Arc::new(manager(&backend));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.ask(&format!("question {i}")).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), REPLY);
    }

    assert!(manager.is_loaded());
    assert!(backend.warm_ups() >= 1);
    assert_eq!(backend.chats(), 8);
}

#[tokio::test]
async fn test_failed_load_stays_unloaded() {
    let backend = FakeBackend::failing();
    let manager = manager(&backend);

    let result = manager.ensure_loaded().await;

    assert!(matches!(result, Err(ModelError::BackendUnavailable(_))));
    assert!(!manager.is_loaded());

    // recovers once the backend is back
    backend.set_failing(false);
    assert_eq!(manager.ensure_loaded().await.unwrap(), LoadStatus::Loaded);
}

#[tokio::test]
async fn test_failed_unload_stays_loaded() {
    let backend = FakeBackend::new();
    let manager = manager(&backend);
    manager.ensure_loaded().await.unwrap();

    backend.set_failing(true);
    let result = manager.unload().await;

    assert!(matches!(result, Err(ModelError::BackendUnavailable(_))));
    assert!(manager.is_loaded());
}

#[tokio::test]
async fn test_ask_surfaces_backend_failure() {
    let backend = FakeBackend::failing();
    let manager = manager(&backend);

    let result = manager.ask("hello").await;

    assert!(matches!(result, Err(ModelError::BackendUnavailable(_))));
    assert!(!manager.is_loaded());
}

#[test]
fn test_status_messages() {
    assert_eq!(LoadStatus::AlreadyLoaded.to_string(), "Model is already loaded");
    assert_eq!(LoadStatus::Loaded.to_string(), "Model loaded successfully");
    assert_eq!(UnloadStatus::Unloaded.to_string(), "Model unloaded successfully");
}
