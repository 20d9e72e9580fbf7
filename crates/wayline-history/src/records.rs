//! Handler for `POST /records` — the remote-call surface.
//!
//! The tracker pushes one record per accepted position update. Appends
//! are pure inserts: replaying the same payload yields two rows.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wayline_core::{history::NewHistoryRecord, store::HistoryStore};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct IngestBody {
  pub username:    String,
  pub latitude:    f64,
  pub longitude:   f64,
  /// Falls back to the server clock when absent.
  pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
  pub status: &'static str,
}

/// `POST /records` — body: `{"username","latitude","longitude","recorded_at"?}`
pub async fn ingest<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<IngestBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HistoryStore,
{
  let record = NewHistoryRecord {
    username:    body.username,
    latitude:    body.latitude,
    longitude:   body.longitude,
    recorded_at: body.recorded_at.unwrap_or_else(Utc::now),
  };

  let stored = state
    .store
    .append(record)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(id = stored.id, username = %stored.username, "record appended");

  Ok((StatusCode::CREATED, Json(IngestResponse { status: "success" })))
}
