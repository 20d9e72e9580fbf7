//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a history API handler.
///
/// Failures serialise to
/// `{"status": "failure", "error": <message>, "reason": <tag>}` — the
/// `status` field mirrors the ack the tracker's link checks on the
/// `/records` surface.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, reason) = match &self {
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "validation"),
      ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store"),
    };
    let body = Json(json!({
      "status": "failure",
      "error":  self.to_string(),
      "reason": reason,
    }));
    (status, body).into_response()
  }
}
