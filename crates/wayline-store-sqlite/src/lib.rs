//! SQLite backends for the Wayline stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Each service opens its own
//! database file; the two stores never share a connection or a schema.

mod encode;
mod history_store;
mod position_store;
mod schema;

pub mod error;

pub use error::{Error, Result};
pub use history_store::SqliteHistoryStore;
pub use position_store::SqlitePositionStore;

#[cfg(test)]
mod tests;
