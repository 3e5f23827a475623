//! `SQLite` schema definitions for the key-value backend.

/// SQL statement to create the key-value table.
///
/// One row per namespace key; the record mapping lives in a single row.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Adds the write timestamp column to `kv_store` (schema version 2).
///
/// `ALTER TABLE` only accepts a constant default; writers fill the column.
pub const ADD_UPDATED_AT_COLUMN: &str = r"
ALTER TABLE kv_store ADD COLUMN updated_at TEXT NOT NULL DEFAULT ''
";

/// Base schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_KV_TABLE, CREATE_METADATA_TABLE];
