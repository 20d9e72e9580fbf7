//! History records — the append-only position log.
//!
//! Records are immutable. The log is never updated or compacted; travel
//! statistics are derived at read time from an ordered window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// One entry in the position history log. Once written, no field is ever
/// updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
  /// Store-assigned, monotonically increasing.
  pub id:          i64,
  /// Correlates with `Position::name`; not enforced across stores.
  pub username:    String,
  pub latitude:    f64,
  pub longitude:   f64,
  pub recorded_at: DateTime<Utc>,
}

impl GeoPoint for HistoryRecord {
  fn latitude(&self) -> f64 { self.latitude }
  fn longitude(&self) -> f64 { self.longitude }
}

/// Input to [`crate::store::HistoryStore::append`].
/// `id` is always assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHistoryRecord {
  pub username:    String,
  pub latitude:    f64,
  pub longitude:   f64,
  pub recorded_at: DateTime<Utc>,
}
