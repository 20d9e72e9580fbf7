//! Async HTTP client pushing accepted updates into the history service.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use wayline_core::link::HistoryLink;

/// Timeout for one notification round trip. There is exactly one attempt
/// per update; a timed-out call fails the enclosing update.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum LinkError {
  #[error("history request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("history service answered {0}")]
  Status(reqwest::StatusCode),
}

/// HTTP implementation of [`HistoryLink`].
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HistoryClient {
  client:   Client,
  base_url: String,
}

#[derive(Serialize)]
struct RecordBody<'a> {
  username:    &'a str,
  latitude:    f64,
  longitude:   f64,
  recorded_at: DateTime<Utc>,
}

impl HistoryClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self, LinkError> {
    let client = Client::builder().timeout(NOTIFY_TIMEOUT).build()?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self) -> String {
    format!("{}/records", self.base_url.trim_end_matches('/'))
  }
}

impl HistoryLink for HistoryClient {
  type Error = LinkError;

  /// `POST /records` on the history service.
  async fn notify(
    &self,
    name: &str,
    latitude: f64,
    longitude: f64,
    recorded_at: DateTime<Utc>,
  ) -> Result<(), LinkError> {
    let resp = self
      .client
      .post(self.url())
      .json(&RecordBody { username: name, latitude, longitude, recorded_at })
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(LinkError::Status(resp.status()));
    }
    Ok(())
  }
}
