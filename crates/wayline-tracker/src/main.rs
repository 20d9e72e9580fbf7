//! wayline-tracker server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! position store, connects the history link, and serves the position
//! API until ctrl-c.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wayline_store_sqlite::SqlitePositionStore;
use wayline_tracker::{
  AppState, ServerConfig, client::HistoryClient, update::UpdateCoordinator,
};

#[derive(Parser)]
#[command(author, version, about = "Wayline position tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WAYLINE_TRACKER"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the position store.
  let store = SqlitePositionStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;

  // Build the history link.
  let link = HistoryClient::new(server_cfg.history_base_url.clone())
    .context("failed to build history client")?;

  // Build application state.
  let store = Arc::new(store);
  let state = AppState {
    store:       store.clone(),
    coordinator: Arc::new(UpdateCoordinator::new(store, Arc::new(link))),
  };

  let app = wayline_tracker::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

/// Resolve when ctrl-c arrives; the server then drains in-flight
/// requests before exiting.
async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    tracing::error!(%err, "failed to install ctrl-c handler");
  }
}
