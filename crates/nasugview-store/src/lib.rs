//! # nasugview-store
//!
//! Device-local key-value storage for the NasugView client, backed by SQLite.
//!
//! The only thing the client persists is the signed-in username; the store
//! is a small string-to-string table plus typed helpers for that session
//! key. Everything else is refetched from the backend on every screen.

pub mod database;
pub mod kv;
pub mod migrations;
pub mod session;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
