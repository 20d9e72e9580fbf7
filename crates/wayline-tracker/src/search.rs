//! Handler for `GET /search`.
//!
//! `latitude`, `longitude` and `radius` must parse as numbers; `page` and
//! `page_size` fall back to their defaults instead of failing.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use wayline_core::{
  link::HistoryLink,
  position::Position,
  store::{PositionStore, ProximityQuery},
};

use crate::{AppState, error::ApiError};

/// Raw query parameters; numeric validation happens in the handler so a
/// bad value produces the structured error payload.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub latitude:  Option<String>,
  pub longitude: Option<String>,
  pub radius:    Option<String>,
  pub page:      Option<String>,
  pub page_size: Option<String>,
}

fn required_f64(name: &'static str, raw: Option<&str>) -> Result<f64, ApiError> {
  let raw =
    raw.ok_or_else(|| ApiError::BadRequest(format!("missing {name}")))?;
  raw
    .trim()
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("invalid {name}: {raw:?}")))
}

/// `GET /search?latitude=..&longitude=..&radius=..[&page=..][&page_size=..]`
pub async fn handler<S, L>(
  State(state): State<AppState<S, L>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Position>>, ApiError>
where
  S: PositionStore,
  L: HistoryLink,
{
  let query = ProximityQuery {
    latitude:  required_f64("latitude", params.latitude.as_deref())?,
    longitude: required_f64("longitude", params.longitude.as_deref())?,
    radius_km: required_f64("radius", params.radius.as_deref())?,
    // Unparseable pages coerce to the defaults, like absent ones.
    page:      params.page.as_deref().and_then(|s| s.trim().parse().ok()),
    page_size: params.page_size.as_deref().and_then(|s| s.trim().parse().ok()),
  };

  let positions = state
    .store
    .search(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(positions))
}
