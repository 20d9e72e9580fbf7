//! History service — owns the append-only position log.
//!
//! Exposes an axum [`Router`] backed by any
//! [`HistoryStore`](wayline_core::store::HistoryStore). `POST /records`
//! is the remote-call surface the tracker pushes accepted updates into;
//! `GET /history/distance` derives travel statistics from the log.

pub mod distance;
pub mod error;
pub mod records;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use wayline_core::store::HistoryStore;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store: Arc<S>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the history service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: HistoryStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/records", post(records::ingest::<S>))
    .route("/history/distance", get(distance::handler::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
