//! Persistence backends for the record store.
//!
//! The record store only needs an opaque string key-value API. This module
//! defines that seam as the [`Backend`] trait and provides two
//! implementations:
//!
//! - [`SqliteBackend`]: durable storage in a single `SQLite` table
//! - [`MemoryBackend`]: a process-local map, used in tests and dry runs

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use crate::error::Result;

/// A string key-value store.
///
/// Writes replace the whole value under a key; there is no partial update.
pub trait Backend: std::fmt::Debug {
    /// Read the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns `true` if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// Statistics about a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of keys stored.
    pub total_keys: i64,
    /// When the most recent write happened, as recorded by the backend.
    pub last_write: Option<String>,
    /// Size of the database file in bytes (0 for in-memory databases).
    pub db_size_bytes: u64,
}
