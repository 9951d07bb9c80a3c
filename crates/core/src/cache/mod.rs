//! SQLite-backed cache for upstream search responses.
//!
//! Raw API responses are stored keyed by a SHA-256 hash of the exact query
//! string, with a fixed expiration window. Async access goes through
//! tokio-rusqlite; the schema is managed by versioned migrations and the
//! database runs in WAL mode.

pub mod connection;
pub mod migrations;
pub mod responses;

pub use crate::Error;
pub use connection::CacheDb;
