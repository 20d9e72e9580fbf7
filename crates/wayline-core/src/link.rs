//! The notification link between the two services.

use std::future::Future;

use chrono::{DateTime, Utc};

/// One-shot push of an accepted position update into the history service.
///
/// A single synchronous remote call with a bounded timeout. There is no
/// retry, queuing, or buffering: a failed call is a hard failure of the
/// enclosing update, and the already-committed position write stays in
/// place.
pub trait HistoryLink: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn notify<'a>(
    &'a self,
    name: &'a str,
    latitude: f64,
    longitude: f64,
    recorded_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
