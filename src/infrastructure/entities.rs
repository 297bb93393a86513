//! Wire entities for the model server's REST API

use serde::{Deserialize, Serialize, Serializer};

/// How long the model server should keep the model resident after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepAlive {
    /// Keep the model warm for a duration string such as `10m`.
    For(String),
    /// Release the model immediately. Serialized as a literal `0`.
    Release,
}

impl Serialize for KeepAlive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            KeepAlive::For(duration) => serializer.serialize_str(duration),
            KeepAlive::Release => serializer.serialize_u8(0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub keep_alive: KeepAlive,
    pub stream: bool,
}

impl GenerateRequest {
    /// A zero-content generation, used only to change residency of the model.
    pub fn empty(model: impl Into<String>, keep_alive: KeepAlive) -> Self {
        GenerateRequest {
            model: model.into(),
            prompt: String::new(),
            keep_alive,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub keep_alive: KeepAlive,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}
