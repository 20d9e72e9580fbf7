//! [`SqlitePositionStore`] — the SQLite implementation of
//! [`PositionStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use wayline_core::{
  geo,
  position::{Position, PositionUpdate, UpsertOutcome},
  store::{PositionStore, ProximityQuery},
};

use crate::{
  Error, Result,
  encode::{decode_dt, encode_dt},
  schema::POSITIONS_SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The current-position store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqlitePositionStore {
  conn: tokio_rusqlite::Connection,
}

struct RawPosition {
  name:       String,
  latitude:   f64,
  longitude:  f64,
  updated_at: String,
}

impl RawPosition {
  fn into_position(self) -> Result<Position> {
    Ok(Position {
      name:       self.name,
      latitude:   self.latitude,
      longitude:  self.longitude,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

impl SqlitePositionStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(POSITIONS_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PositionStore impl ──────────────────────────────────────────────────────

impl PositionStore for SqlitePositionStore {
  type Error = Error;

  async fn upsert(
    &self,
    update: PositionUpdate,
  ) -> Result<(Position, UpsertOutcome)> {
    let position = Position {
      name:       update.name,
      latitude:   update.latitude,
      longitude:  update.longitude,
      updated_at: Utc::now(),
    };

    let name   = position.name.clone();
    let lat    = position.latitude;
    let lon    = position.longitude;
    let at_str = encode_dt(position.updated_at);

    let outcome = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM positions WHERE name = ?1",
            rusqlite::params![name],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if exists {
          conn.execute(
            "UPDATE positions SET latitude = ?2, longitude = ?3, updated_at = ?4
             WHERE name = ?1",
            rusqlite::params![name, lat, lon, at_str],
          )?;
          Ok(UpsertOutcome::Updated)
        } else {
          conn.execute(
            "INSERT INTO positions (name, latitude, longitude, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![name, lat, lon, at_str],
          )?;
          Ok(UpsertOutcome::Inserted)
        }
      })
      .await?;

    Ok((position, outcome))
  }

  async fn list(&self) -> Result<Vec<Position>> {
    let raws: Vec<RawPosition> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT name, latitude, longitude, updated_at FROM positions")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawPosition {
              name:       row.get(0)?,
              latitude:   row.get(1)?,
              longitude:  row.get(2)?,
              updated_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPosition::into_position).collect()
  }

  async fn search(&self, query: &ProximityQuery) -> Result<Vec<Position>> {
    // Distance is computed in Rust so it matches `geo::haversine_km` to
    // floating-point precision. The table is one row per tracked name.
    let all = self.list().await?;

    let mut ranked: Vec<(f64, Position)> = all
      .into_iter()
      .map(|p| {
        let d = geo::haversine_km(
          query.latitude,
          query.longitude,
          p.latitude,
          p.longitude,
        );
        (d, p)
      })
      .filter(|(d, _)| *d <= query.radius_km)
      .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(
      ranked
        .into_iter()
        .skip(query.offset())
        .take(query.limit())
        .map(|(_, p)| p)
        .collect(),
    )
  }
}
