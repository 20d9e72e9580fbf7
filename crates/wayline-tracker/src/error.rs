//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::update::UpdateError;

/// An error returned by a tracker API handler.
///
/// Every failure serialises to `{"error": <message>, "reason": <tag>}` so
/// callers can tell the failure class apart without parsing the message.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("history link error: {0}")]
  Link(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<UpdateError> for ApiError {
  fn from(err: UpdateError) -> Self {
    match err {
      UpdateError::Rejected(e) => ApiError::BadRequest(e.to_string()),
      UpdateError::Store(e) => ApiError::Store(e),
      UpdateError::Link(e) => ApiError::Link(e),
    }
  }
}

impl ApiError {
  fn reason(&self) -> &'static str {
    match self {
      ApiError::BadRequest(_) => "validation",
      ApiError::Store(_) => "store",
      ApiError::Link(_) => "link",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Link(_) => StatusCode::BAD_GATEWAY,
    };
    let body = Json(json!({ "error": self.to_string(), "reason": self.reason() }));
    (status, body).into_response()
  }
}
