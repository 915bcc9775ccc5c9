use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use caption_generator::config::Config;
use caption_generator::transport::GroqTransport;
use caption_generator::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    config.validate()?;

    // Without a credential nothing else can work; stop before serving.
    let api_key = match config.api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            tracing::error!("❌ {}", e);
            return Err(e.into());
        }
    };

    let bind = config.bind_addr()?;
    let transport = Arc::new(GroqTransport::new(api_key, config.groq.api_url.clone())?);
    let state = AppState::new(Arc::new(config), transport);
    let router = web::router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "Starting caption generator");

    axum::serve(listener, router).await?;
    Ok(())
}
