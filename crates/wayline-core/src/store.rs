//! The store traits and supporting query types.
//!
//! The traits are implemented by storage backends (e.g.
//! `wayline-store-sqlite`). The services depend on these abstractions,
//! not on any concrete backend. Each store is owned by exactly one
//! service; the only thing that spans both is the `name`/`username`
//! string.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  history::{HistoryRecord, NewHistoryRecord},
  position::{Position, PositionUpdate, UpsertOutcome},
};

// ─── Query types ─────────────────────────────────────────────────────────────

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Parameters for [`PositionStore::search`].
#[derive(Debug, Clone)]
pub struct ProximityQuery {
  /// Latitude of the query point, degrees.
  pub latitude:  f64,
  /// Longitude of the query point, degrees.
  pub longitude: f64,
  /// Positions farther than this are excluded.
  pub radius_km: f64,
  /// 1-based page number. Absent or non-positive values coerce to
  /// [`DEFAULT_PAGE`] silently.
  pub page:      Option<i64>,
  /// Absent or non-positive values coerce to [`DEFAULT_PAGE_SIZE`]
  /// silently.
  pub page_size: Option<i64>,
}

impl ProximityQuery {
  pub fn page(&self) -> i64 {
    match self.page {
      Some(p) if p >= 1 => p,
      _ => DEFAULT_PAGE,
    }
  }

  pub fn page_size(&self) -> i64 {
    match self.page_size {
      Some(s) if s >= 1 => s,
      _ => DEFAULT_PAGE_SIZE,
    }
  }

  /// Number of ranked results to skip: `(page - 1) * page_size`.
  pub fn offset(&self) -> usize {
    ((self.page() - 1) * self.page_size()) as usize
  }

  /// Number of ranked results to keep after the offset.
  pub fn limit(&self) -> usize { self.page_size() as usize }
}

/// Parameters for [`HistoryStore::query_range`]. Both bounds are
/// inclusive.
#[derive(Debug, Clone)]
pub struct RangeQuery {
  pub username: String,
  pub start:    DateTime<Utc>,
  pub end:      DateTime<Utc>,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Abstraction over the current-position store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait PositionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a position for a new name, or overwrite coordinates and
  /// timestamp in place for an existing one. `updated_at` is set by the
  /// store.
  fn upsert(
    &self,
    update: PositionUpdate,
  ) -> impl Future<Output = Result<(Position, UpsertOutcome), Self::Error>> + Send + '_;

  /// Every stored position.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Position>, Self::Error>> + Send + '_;

  /// Positions within `query.radius_km` of the query point, nearest
  /// first, windowed by `query.offset()`/`query.limit()`.
  fn search<'a>(
    &'a self,
    query: &'a ProximityQuery,
  ) -> impl Future<Output = Result<Vec<Position>, Self::Error>> + Send + 'a;
}

/// Abstraction over the append-only history store.
pub trait HistoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one record. A pure insert — no dedup, no merge.
  fn append(
    &self,
    record: NewHistoryRecord,
  ) -> impl Future<Output = Result<HistoryRecord, Self::Error>> + Send + '_;

  /// Records for `query.username` with `recorded_at` inside the window,
  /// ordered by `recorded_at` ascending. No matches is an empty vec, not
  /// an error.
  fn query_range<'a>(
    &'a self,
    query: &'a RangeQuery,
  ) -> impl Future<Output = Result<Vec<HistoryRecord>, Self::Error>> + Send + 'a;
}
