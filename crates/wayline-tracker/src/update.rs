//! The update coordinator — validate, persist, notify.
//!
//! An update is accepted only after the position write has committed and
//! the history service has acknowledged the notification. A notify
//! failure is reported to the caller while the committed position write
//! stays in place, so current position and history can diverge; callers
//! observe that divergence as an error response for a position that is
//! nonetheless visible.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use wayline_core::{
  link::HistoryLink,
  position::{Position, PositionUpdate},
  store::PositionStore,
};

/// Why an update did not reach the accepted state.
#[derive(Debug, Error)]
pub enum UpdateError {
  /// Validation failed; neither the store nor the link was called.
  #[error(transparent)]
  Rejected(#[from] wayline_core::Error),

  /// The position write failed; the link was never called.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The position write committed but the history notification failed.
  #[error("history link error: {0}")]
  Link(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Orchestrates a position update end to end.
///
/// Both collaborators are injected at construction; the coordinator owns
/// no other state.
pub struct UpdateCoordinator<S, L> {
  store: Arc<S>,
  link:  Arc<L>,
}

impl<S, L> Clone for UpdateCoordinator<S, L> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), link: Arc::clone(&self.link) }
  }
}

impl<S, L> UpdateCoordinator<S, L>
where
  S: PositionStore,
  L: HistoryLink,
{
  pub fn new(store: Arc<S>, link: Arc<L>) -> Self {
    Self { store, link }
  }

  /// Run one update through validate → persist → notify.
  pub async fn apply(&self, update: PositionUpdate) -> Result<Position, UpdateError> {
    update.validate()?;

    let (position, outcome) = self
      .store
      .upsert(update)
      .await
      .map_err(|e| UpdateError::Store(Box::new(e)))?;

    tracing::debug!(name = %position.name, ?outcome, "position persisted");

    // The upsert above stays committed even if this fails.
    self
      .link
      .notify(
        &position.name,
        position.latitude,
        position.longitude,
        Utc::now(),
      )
      .await
      .map_err(|e| UpdateError::Link(Box::new(e)))?;

    Ok(position)
  }
}
