use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use writeit::config::AppConfig;
use writeit::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "writeit", about = "WriteIt writing backend", version)]
struct Cli {
    /// TOML configuration file; missing files are ignored.
    #[arg(long, default_value = "writeit.toml")]
    config: PathBuf,

    /// Insert sample content for the demo user on startup.
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config).context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    tracing::info!("Starting WriteIt server...");

    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize application state")?;

    if cli.seed_demo {
        writeit::demo_seeder::seed_demo_data(&state)
            .await
            .context("Failed to seed demo data")?;
    }

    let app = writeit::app::build_router(state);

    tracing::info!("Listening on http://{}", config.server.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
