//! Position — the current-state record for a named entity.
//!
//! There is exactly one position per name. Upserts overwrite coordinates
//! and timestamp in place; positions are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, geo::GeoPoint};

/// The current position of a named entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
  /// Unique key. Correlates with `HistoryRecord::username` by value only.
  pub name:       String,
  pub latitude:   f64,
  pub longitude:  f64,
  /// Server-assigned; overwritten on every upsert.
  pub updated_at: DateTime<Utc>,
}

impl GeoPoint for Position {
  fn latitude(&self) -> f64 { self.latitude }
  fn longitude(&self) -> f64 { self.longitude }
}

/// Whether an upsert created a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
  Inserted,
  Updated,
}

/// A position update command, as submitted by a client.
///
/// Input to [`crate::store::PositionStore::upsert`]. `updated_at` is always
/// set by the store; it is not accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionUpdate {
  pub name:      String,
  pub latitude:  f64,
  pub longitude: f64,
}

impl PositionUpdate {
  /// Check the update against the domain invariants.
  ///
  /// A rejected update must never reach a store or the history link.
  pub fn validate(&self) -> Result<()> {
    if self.name.is_empty() {
      return Err(Error::EmptyName);
    }
    if !(-90.0..=90.0).contains(&self.latitude) {
      return Err(Error::LatitudeOutOfRange(self.latitude));
    }
    if !(-180.0..=180.0).contains(&self.longitude) {
      return Err(Error::LongitudeOutOfRange(self.longitude));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn update(name: &str, latitude: f64, longitude: f64) -> PositionUpdate {
    PositionUpdate { name: name.to_owned(), latitude, longitude }
  }

  #[test]
  fn valid_update_passes() {
    assert!(update("john_doe", 40.7128, -74.0060).validate().is_ok());
  }

  #[test]
  fn boundary_coordinates_pass() {
    assert!(update("pole", 90.0, 180.0).validate().is_ok());
    assert!(update("pole", -90.0, -180.0).validate().is_ok());
  }

  #[test]
  fn empty_name_is_rejected() {
    assert!(matches!(
      update("", 0.0, 0.0).validate(),
      Err(Error::EmptyName)
    ));
  }

  #[test]
  fn out_of_range_latitude_is_rejected() {
    assert!(matches!(
      update("john_doe", 90.0001, 0.0).validate(),
      Err(Error::LatitudeOutOfRange(_))
    ));
    assert!(matches!(
      update("john_doe", -999.0, 0.0).validate(),
      Err(Error::LatitudeOutOfRange(_))
    ));
  }

  #[test]
  fn out_of_range_longitude_is_rejected() {
    assert!(matches!(
      update("john_doe", 0.0, 180.0001).validate(),
      Err(Error::LongitudeOutOfRange(_))
    ));
  }
}
