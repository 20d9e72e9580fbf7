//! Error types for `wayline-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("name must not be empty")]
  EmptyName,

  #[error("latitude {0} is outside [-90, 90]")]
  LatitudeOutOfRange(f64),

  #[error("longitude {0} is outside [-180, 180]")]
  LongitudeOutOfRange(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
