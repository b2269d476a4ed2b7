use std::sync::Arc;

use diary_core::{config::Config, router::CommandRouter};

#[tokio::main]
async fn main() -> Result<(), diary_core::Error> {
    diary_core::logging::init("diary")?;

    let cfg = Arc::new(Config::load()?);
    tracing::info!(transport = cfg.transport.name(), "configuration loaded");

    // Journals live in memory only; a restart starts everyone from scratch.
    let router = Arc::new(CommandRouter::new());

    diary_telegram::router::run(cfg, router)
        .await
        .map_err(|e| diary_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
