//! Career assessment quiz backend on a local Ollama model
//!
//! (c) Softlandia 2025

use career_quiz_api::api;
use career_quiz_api::config::Settings;

use anyhow::{Context, anyhow};
use axum::http::{HeaderValue, Method};
use di_axum::RouterServiceProviderExtensions;
use log::info;
use tokio::runtime::{Builder, Runtime};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;
    info!("Using model {} on {}", settings.model, settings.ollama_host);

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(web_server_task(settings))
}

async fn web_server_task(settings: Settings) -> anyhow::Result<()> {
    let bind_address = settings.bind_address;
    let origins = settings
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin `{origin}`"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let provider = career_quiz_api::services(settings)
        .build_provider()
        .map_err(|e| anyhow!("failed to build service provider: {e:?}"))?;

    let app = api::router()
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_headers(Any)
                    .allow_methods([Method::GET, Method::POST])
                    .allow_origin(origins),
            ),
        )
        .with_provider(provider);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    info!("Shutting down...");

    Ok(())
}
