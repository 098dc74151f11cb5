//! Hat Studio - automation editor backend

use hat_codegen::CodeGenerator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod config;
mod routes;

use client::HatClient;
use config::Config;
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hat_studio_api=debug,hat_codegen=debug,info".into()),
        )
        .init();

    tracing::info!("Starting Hat Studio API server");

    let config = Config::from_env()?;
    tracing::info!("Using Hat runtime at {}", config.runtime_url);
    tracing::info!("String quoting: {:?}", config.generator.quoting);

    let state = AppState {
        generator: CodeGenerator::new(config.generator),
        client: HatClient::new(config.runtime_url.clone()),
    };

    let app = routes::router(state);

    // Start server
    tracing::info!("Listening on http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
