//! Integration tests for the SQLite stores against in-memory databases.

use chrono::{DateTime, TimeZone, Utc};
use wayline_core::{
  history::NewHistoryRecord,
  position::{PositionUpdate, UpsertOutcome},
  store::{HistoryStore, PositionStore, ProximityQuery, RangeQuery},
};

use crate::{SqliteHistoryStore, SqlitePositionStore};

async fn positions() -> SqlitePositionStore {
  SqlitePositionStore::open_in_memory()
    .await
    .expect("in-memory position store")
}

async fn history() -> SqliteHistoryStore {
  SqliteHistoryStore::open_in_memory()
    .await
    .expect("in-memory history store")
}

fn update(name: &str, latitude: f64, longitude: f64) -> PositionUpdate {
  PositionUpdate { name: name.to_owned(), latitude, longitude }
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 1, 16, h, m, 0).unwrap()
}

fn record(username: &str, lat: f64, lon: f64, recorded_at: DateTime<Utc>) -> NewHistoryRecord {
  NewHistoryRecord {
    username: username.to_owned(),
    latitude: lat,
    longitude: lon,
    recorded_at,
  }
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_new_name_inserts_one_row() {
  let s = positions().await;

  let (position, outcome) =
    s.upsert(update("john_doe", 40.7128, -74.0060)).await.unwrap();
  assert_eq!(outcome, UpsertOutcome::Inserted);
  assert_eq!(position.name, "john_doe");

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].latitude, 40.7128);
}

#[tokio::test]
async fn upsert_existing_name_overwrites_in_place() {
  let s = positions().await;

  let (first, _) = s.upsert(update("john_doe", 40.7128, -74.0060)).await.unwrap();
  let (second, outcome) =
    s.upsert(update("john_doe", 34.0522, -118.2437)).await.unwrap();
  assert_eq!(outcome, UpsertOutcome::Updated);

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 1, "upsert must not create a duplicate row");
  assert_eq!(all[0].latitude, 34.0522);
  assert_eq!(all[0].longitude, -118.2437);
  assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn upsert_distinct_names_coexist() {
  let s = positions().await;

  s.upsert(update("john_doe", 40.7128, -74.0060)).await.unwrap();
  s.upsert(update("jane_doe", 34.0522, -118.2437)).await.unwrap();

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 2);
}

// ─── Proximity search ────────────────────────────────────────────────────────

fn search_query(
  lat: f64,
  lon: f64,
  radius_km: f64,
  page: Option<i64>,
  page_size: Option<i64>,
) -> ProximityQuery {
  ProximityQuery { latitude: lat, longitude: lon, radius_km, page, page_size }
}

#[tokio::test]
async fn search_radius_zero_matches_the_exact_point() {
  let s = positions().await;
  s.upsert(update("here", 40.7128, -74.0060)).await.unwrap();

  let hits = s
    .search(&search_query(40.7128, -74.0060, 0.0, None, None))
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "here");
}

#[tokio::test]
async fn search_excludes_points_beyond_the_radius() {
  let s = positions().await;
  // ~111 km per degree of latitude at the equator.
  s.upsert(update("near", 0.1, 0.0)).await.unwrap();
  s.upsert(update("far", 5.0, 0.0)).await.unwrap();

  let hits = s.search(&search_query(0.0, 0.0, 50.0, None, None)).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "near");
}

#[tokio::test]
async fn search_orders_nearest_first() {
  let s = positions().await;
  s.upsert(update("third", 3.0, 0.0)).await.unwrap();
  s.upsert(update("first", 1.0, 0.0)).await.unwrap();
  s.upsert(update("second", 2.0, 0.0)).await.unwrap();

  let hits = s.search(&search_query(0.0, 0.0, 500.0, None, None)).await.unwrap();
  let names: Vec<_> = hits.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["first", "second", "third"]);
}

#[tokio::test]
async fn search_second_page_of_size_one_is_second_nearest() {
  let s = positions().await;
  s.upsert(update("first", 1.0, 0.0)).await.unwrap();
  s.upsert(update("second", 2.0, 0.0)).await.unwrap();
  s.upsert(update("third", 3.0, 0.0)).await.unwrap();

  let hits = s
    .search(&search_query(0.0, 0.0, 500.0, Some(2), Some(1)))
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "second");
}

#[tokio::test]
async fn search_coerces_invalid_pagination_to_defaults() {
  let s = positions().await;
  s.upsert(update("only", 1.0, 0.0)).await.unwrap();

  let hits = s
    .search(&search_query(0.0, 0.0, 500.0, Some(0), Some(-3)))
    .await
    .unwrap();
  assert_eq!(hits.len(), 1, "page 0 must behave like page 1");
}

#[tokio::test]
async fn search_of_empty_store_is_empty() {
  let s = positions().await;
  let hits = s.search(&search_query(0.0, 0.0, 100.0, None, None)).await.unwrap();
  assert!(hits.is_empty());
}

// ─── History append ──────────────────────────────────────────────────────────

#[tokio::test]
async fn append_assigns_increasing_ids() {
  let s = history().await;

  let a = s.append(record("john_doe", 40.7128, -74.0060, at(10, 0))).await.unwrap();
  let b = s.append(record("john_doe", 40.7138, -74.0070, at(11, 0))).await.unwrap();

  assert!(b.id > a.id);
}

#[tokio::test]
async fn append_is_a_pure_insert() {
  let s = history().await;

  // The same payload twice yields two rows.
  s.append(record("john_doe", 40.7128, -74.0060, at(10, 0))).await.unwrap();
  s.append(record("john_doe", 40.7128, -74.0060, at(10, 0))).await.unwrap();

  let q = RangeQuery {
    username: "john_doe".to_owned(),
    start:    at(0, 0),
    end:      at(23, 59),
  };
  assert_eq!(s.query_range(&q).await.unwrap().len(), 2);
}

// ─── Range query ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_range_orders_by_recorded_at_ascending() {
  let s = history().await;

  s.append(record("john_doe", 39.12355, 27.64538, at(12, 0))).await.unwrap();
  s.append(record("john_doe", 35.12314, 27.64532, at(10, 0))).await.unwrap();

  let q = RangeQuery {
    username: "john_doe".to_owned(),
    start:    at(0, 0),
    end:      at(23, 59),
  };
  let records = s.query_range(&q).await.unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[0].recorded_at, at(10, 0));
  assert_eq!(records[1].recorded_at, at(12, 0));
}

#[tokio::test]
async fn query_range_bounds_are_inclusive() {
  let s = history().await;

  s.append(record("john_doe", 1.0, 1.0, at(10, 0))).await.unwrap();
  s.append(record("john_doe", 2.0, 2.0, at(12, 0))).await.unwrap();
  s.append(record("john_doe", 3.0, 3.0, at(14, 0))).await.unwrap();

  let q = RangeQuery {
    username: "john_doe".to_owned(),
    start:    at(10, 0),
    end:      at(12, 0),
  };
  let records = s.query_range(&q).await.unwrap();
  assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn query_range_filters_by_username() {
  let s = history().await;

  s.append(record("john_doe", 1.0, 1.0, at(10, 0))).await.unwrap();
  s.append(record("jane_doe", 2.0, 2.0, at(10, 30))).await.unwrap();

  let q = RangeQuery {
    username: "jane_doe".to_owned(),
    start:    at(0, 0),
    end:      at(23, 59),
  };
  let records = s.query_range(&q).await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].username, "jane_doe");
}

#[tokio::test]
async fn query_range_with_no_matches_is_empty_not_an_error() {
  let s = history().await;

  let q = RangeQuery {
    username: "unknown_user".to_owned(),
    start:    at(0, 0),
    end:      at(23, 59),
  };
  let records = s.query_range(&q).await.unwrap();
  assert!(records.is_empty());
}
