//! Terminal client entry point.
mod app;
mod config;
mod input;
mod logging;
mod presentation;
mod state;

use anyhow::Result;

use app::App;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env()?;

    logging::setup_logging(config.session_id.as_deref())?;

    App::new(config).run().await
}
