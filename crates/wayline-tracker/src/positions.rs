//! Handlers for `/locations`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/locations` | Every stored position |
//! | `POST` | `/locations` | Body: `{"name","latitude","longitude"}` |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use wayline_core::{
  link::HistoryLink,
  position::{Position, PositionUpdate},
  store::PositionStore,
};

use crate::{AppState, error::ApiError};

/// `GET /locations`
pub async fn list<S, L>(
  State(state): State<AppState<S, L>>,
) -> Result<Json<Vec<Position>>, ApiError>
where
  S: PositionStore,
  L: HistoryLink,
{
  let positions = state
    .store
    .list()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(positions))
}

/// `POST /locations` — body: `{"name":"...","latitude":..,"longitude":..}`
///
/// Runs the full validate → persist → notify pipeline; the response is
/// 201 only once the history service has acknowledged the update.
pub async fn upsert<S, L>(
  State(state): State<AppState<S, L>>,
  Json(body): Json<PositionUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PositionStore,
  L: HistoryLink,
{
  let position = state.coordinator.apply(body).await?;
  Ok((StatusCode::CREATED, Json(position)))
}
