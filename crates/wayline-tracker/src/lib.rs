//! Position service — owns the current position of each named entity.
//!
//! Exposes an axum [`Router`] backed by any
//! [`PositionStore`](wayline_core::store::PositionStore) and
//! [`HistoryLink`](wayline_core::link::HistoryLink). Every accepted
//! update is pushed through the link to the history service before the
//! request is answered.

pub mod client;
pub mod error;
pub mod positions;
pub mod search;
pub mod update;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use wayline_core::{link::HistoryLink, store::PositionStore};

use update::UpdateCoordinator;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Base URL of the history service, e.g. `http://localhost:8081`.
  pub history_base_url: String,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S, L> {
  pub store:       Arc<S>,
  pub coordinator: Arc<UpdateCoordinator<S, L>>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the position service.
pub fn router<S, L>(state: AppState<S, L>) -> Router
where
  S: PositionStore + Clone + Send + Sync + 'static,
  L: HistoryLink + Clone + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/locations",
      get(positions::list::<S, L>).post(positions::upsert::<S, L>),
    )
    .route("/search", get(search::handler::<S, L>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
