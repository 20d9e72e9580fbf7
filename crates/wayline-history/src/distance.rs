//! Handler for `GET /history/distance`.
//!
//! Loads the ordered window for a user and folds it through the distance
//! engine. Start and end default to a trailing 24-hour window ending now.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use wayline_core::{
  geo,
  store::{HistoryStore, RangeQuery},
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct DistanceParams {
  pub username: String,
  pub start:    Option<DateTime<Utc>>,
  pub end:      Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
  pub username:          String,
  /// Kilometres, formatted to two decimal places.
  pub total_distance_km: String,
}

/// `GET /history/distance?username=<u>[&start=<rfc3339>][&end=<rfc3339>]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<DistanceParams>,
) -> Result<Json<DistanceResponse>, ApiError>
where
  S: HistoryStore,
{
  let now = Utc::now();
  let query = RangeQuery {
    username: params.username.clone(),
    start:    params.start.unwrap_or_else(|| now - Duration::hours(24)),
    end:      params.end.unwrap_or(now),
  };

  let records = state
    .store
    .query_range(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let total = geo::total_distance_km(&records);

  Ok(Json(DistanceResponse {
    username:          params.username,
    total_distance_km: format!("{total:.2}"),
  }))
}
