//! Findly application binary - composition root.
//!
//! Ties together all Findly crates into a single executable:
//! 1. Load configuration from TOML and apply CLI/env overrides
//! 2. Build the configured search provider (fatal if credentials missing)
//! 3. Build the dialog engine
//! 4. Start the axum HTTP server for the chat transport

mod cli;

use clap::Parser;

use findly_api::{create_router, AppState};
use findly_core::config::FindlyConfig;
use findly_dialog::DialogEngine;
use findly_search::build_provider;

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first: the log level may come from it.
    let config_file = args.resolve_config_path();
    let mut config = FindlyConfig::load_or_default(&config_file);

    if let Some(port) = args.port {
        config.general.port = port;
    }
    match args.resolve_provider() {
        Ok(Some(provider)) => config.search.provider = provider,
        Ok(None) => {}
        Err(msg) => {
            eprintln!("Error: {msg}");
            std::process::exit(2);
        }
    }

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Findly v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Missing credentials or an empty language set is fatal here, not a
    // runtime surprise on the first search.
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let provider = build_provider(&config)?;
    tracing::info!(
        provider = provider.name(),
        max_results = config.search.max_results,
        "Search provider ready"
    );

    let engine = DialogEngine::new(&config, provider);

    let port = args.resolve_port(config.general.port);
    let state = AppState::new(config, engine);
    let router = create_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind — is another instance running?");
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "Findly AI is Active!");

    axum::serve(listener, router).await?;

    Ok(())
}
