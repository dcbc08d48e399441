//! Terminal host for the settlers engine.
//!
//! Reads commands from stdin, applies them once per frame and prints the
//! resulting frame to stdout. Tracing goes to stderr.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod render;
mod session;

use config::HostConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = HostConfig::from_env()?;

    info!(
        players = config.players.len(),
        seed = ?config.seed,
        fps = config.fps,
        "Starting settlers host..."
    );

    session::run(config).await
}
