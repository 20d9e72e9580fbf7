//! Core types and trait definitions for the Wayline position tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Both services and their storage backends depend on it; it depends on
//! nothing heavier than `chrono` and `serde`.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod geo;
pub mod history;
pub mod link;
pub mod position;
pub mod store;

pub use error::{Error, Result};
