//! [`SqliteHistoryStore`] — the SQLite implementation of [`HistoryStore`].

use std::path::Path;

use wayline_core::{
  history::{HistoryRecord, NewHistoryRecord},
  store::{HistoryStore, RangeQuery},
};

use crate::{
  Error, Result,
  encode::{decode_dt, encode_dt},
  schema::HISTORY_SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The append-only history store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteHistoryStore {
  conn: tokio_rusqlite::Connection,
}

struct RawRecord {
  id:          i64,
  username:    String,
  latitude:    f64,
  longitude:   f64,
  recorded_at: String,
}

impl RawRecord {
  fn into_record(self) -> Result<HistoryRecord> {
    Ok(HistoryRecord {
      id:          self.id,
      username:    self.username,
      latitude:    self.latitude,
      longitude:   self.longitude,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

impl SqliteHistoryStore {
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
        conn.execute_batch(HISTORY_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── HistoryStore impl ───────────────────────────────────────────────────────

impl HistoryStore for SqliteHistoryStore {
  type Error = Error;

  async fn append(&self, record: NewHistoryRecord) -> Result<HistoryRecord> {
    let username = record.username.clone();
    let lat      = record.latitude;
    let lon      = record.longitude;
    let at_str   = encode_dt(record.recorded_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO history (username, latitude, longitude, recorded_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![username, lat, lon, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(HistoryRecord {
      id,
      username:    record.username,
      latitude:    record.latitude,
      longitude:   record.longitude,
      recorded_at: record.recorded_at,
    })
  }

  async fn query_range(&self, query: &RangeQuery) -> Result<Vec<HistoryRecord>> {
    let username  = query.username.clone();
    let start_str = encode_dt(query.start);
    let end_str   = encode_dt(query.end);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, username, latitude, longitude, recorded_at
           FROM history
           WHERE username = ?1 AND recorded_at BETWEEN ?2 AND ?3
           ORDER BY recorded_at ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![username, start_str, end_str], |row| {
            Ok(RawRecord {
              id:          row.get(0)?,
              username:    row.get(1)?,
              latitude:    row.get(2)?,
              longitude:   row.get(3)?,
              recorded_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}
