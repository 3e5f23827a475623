//! `SQLite`-backed key-value storage.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{migrations, Backend, StorageStats};
use crate::error::{Error, Result};

/// A [`Backend`] persisting keys in a single `SQLite` table.
#[derive(Debug)]
pub struct SqliteBackend {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteBackend {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then initializes or migrates the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_keys: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;

        let last_write: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE updated_at != '' ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_keys,
            last_write,
            db_size_bytes,
        })
    }
}

impl Backend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "Wrote value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_backend() -> SqliteBackend {
        SqliteBackend::open_in_memory().expect("failed to create test backend")
    }

    fn remove_db_files(path: &Path) {
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }

    #[test]
    fn test_get_missing_key() {
        let backend = create_test_backend();
        assert_eq!(backend.get("users").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut backend = create_test_backend();
        backend.set("users", r#"{"a@x.com":{}}"#).unwrap();
        assert_eq!(
            backend.get("users").unwrap().as_deref(),
            Some(r#"{"a@x.com":{}}"#)
        );
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let mut backend = create_test_backend();
        backend.set("users", "first").unwrap();
        backend.set("users", "second").unwrap();

        assert_eq!(backend.get("users").unwrap().as_deref(), Some("second"));
        assert_eq!(backend.stats().unwrap().total_keys, 1);
    }

    #[test]
    fn test_remove() {
        let mut backend = create_test_backend();
        backend.set("users", "{}").unwrap();

        assert!(backend.remove("users").unwrap());
        assert_eq!(backend.get("users").unwrap(), None);
        assert!(!backend.remove("users").unwrap());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut backend = create_test_backend();
        backend.set("users", "u").unwrap();
        backend.set("other", "o").unwrap();
        backend.remove("other").unwrap();

        assert_eq!(backend.get("users").unwrap().as_deref(), Some("u"));
    }

    #[test]
    fn test_unicode_value() {
        let mut backend = create_test_backend();
        backend.set("users", "Иван Петров").unwrap();
        assert_eq!(
            backend.get("users").unwrap().as_deref(),
            Some("Иван Петров")
        );
    }

    #[test]
    fn test_stats_empty() {
        let stats = create_test_backend().stats().unwrap();
        assert_eq!(stats.total_keys, 0);
        assert!(stats.last_write.is_none());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_records_last_write() {
        let mut backend = create_test_backend();
        backend.set("users", "{}").unwrap();

        let stats = backend.stats().unwrap();
        assert_eq!(stats.total_keys, 1);
        assert!(stats.last_write.is_some());
    }

    #[test]
    fn test_path() {
        let backend = create_test_backend();
        assert_eq!(backend.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based_persists_across_reopen() {
        let db_path =
            std::env::temp_dir().join(format!("usercards_test_{}.db", std::process::id()));

        let mut backend = SqliteBackend::open(&db_path).unwrap();
        backend.set("users", "{}").unwrap();
        assert_eq!(backend.path(), db_path);
        drop(backend);

        let reopened = SqliteBackend::open(&db_path).unwrap();
        assert_eq!(reopened.get("users").unwrap().as_deref(), Some("{}"));
        assert!(reopened.stats().unwrap().db_size_bytes > 0);

        drop(reopened);
        remove_db_files(&db_path);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("usercards_test_{}", std::process::id()));
        let nested_path = root.join("nested/db.sqlite");
        let _ = std::fs::remove_dir_all(&root);

        let backend = SqliteBackend::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(backend);
        let _ = std::fs::remove_dir_all(&root);
    }
}
