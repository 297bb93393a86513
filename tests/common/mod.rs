//! Shared test doubles.

#![allow(dead_code)]

use async_trait::async_trait;
use career_quiz_api::infrastructure::entities::{
    ChatMessage, ChatRequest, ChatResponse, GenerateRequest, KeepAlive, Role,
};
use career_quiz_api::infrastructure::traits::{BackendError, ModelBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const REPLY: &str = "What kind of team do you enjoy working in?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Warm { model: String, keep_alive: String },
    Release { model: String },
    Chat { model: String, messages: Vec<ChatMessage> },
}

/// Records every call and answers chats with [`REPLY`], or fails everything once `fail` is set.
#[derive(Clone, Default)]
pub struct FakeBackend {
    calls: Arc<Mutex<Vec<BackendCall>>>,
    fail: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let backend = Self::default();
        backend.set_failing(true);
        backend
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn warm_ups(&self) -> usize {
        self.count(|c| matches!(c, BackendCall::Warm { .. }))
    }

    pub fn releases(&self) -> usize {
        self.count(|c| matches!(c, BackendCall::Release { .. }))
    }

    pub fn chats(&self) -> usize {
        self.count(|c| matches!(c, BackendCall::Chat { .. }))
    }

    /// User prompts of every chat call, in order.
    pub fn chat_prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                BackendCall::Chat { messages, .. } => {
                    Some(messages.iter().map(|m| m.content.clone()).collect())
                }
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(*c)).count()
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(BackendError::Status {
                status: 503,
                body: "model server is down".to_owned(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ModelBackend for FakeBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<(), BackendError> {
        self.check()?;
        let call = match request.keep_alive {
            KeepAlive::For(keep_alive) => BackendCall::Warm {
                model: request.model,
                keep_alive,
            },
            KeepAlive::Release => BackendCall::Release {
                model: request.model,
            },
        };
        self.calls.lock().unwrap().push(call);
        Ok(())
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        self.check()?;
        self.calls.lock().unwrap().push(BackendCall::Chat {
            model: request.model,
            messages: request.messages,
        });
        Ok(ChatResponse {
            message: ChatMessage {
                role: Role::Assistant,
                content: REPLY.to_owned(),
            },
        })
    }
}
