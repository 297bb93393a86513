//! Process settings, read once at startup from the environment (and `.env`).

use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MODEL_NAME: &str = "llama3.2";
pub const DEFAULT_KEEP_ALIVE: &str = "10m";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: SocketAddr,
    /// Base URL of the model server, always with a scheme and no trailing slash.
    pub ollama_host: String,
    pub model: String,
    pub keep_alive: String,
    pub cors_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Settings> {
        dotenvy::dotenv().ok();
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, falling back to defaults for missing or blank keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let bind_address = get("BIND_ADDRESS", DEFAULT_BIND_ADDRESS);
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid BIND_ADDRESS `{bind_address}`"))?;

        let cors_origins = get("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Settings {
            bind_address,
            ollama_host: normalize_host(&get("OLLAMA_HOST", DEFAULT_OLLAMA_HOST)),
            model: get("MODEL_NAME", DEFAULT_MODEL_NAME),
            keep_alive: get("MODEL_KEEP_ALIVE", DEFAULT_KEEP_ALIVE),
            cors_origins,
        })
    }
}

/// `OLLAMA_HOST` is commonly given as `host:port` without a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_owned()
    } else {
        format!("http://{host}")
    }
}
