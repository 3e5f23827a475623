//! In-memory backend.

use std::collections::HashMap;

use super::Backend;
use crate::error::Result;

/// A [`Backend`] that keeps values in a process-local map.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with one value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    /// Number of keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut backend = MemoryBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.get("users").unwrap(), None);

        backend.set("users", "{}").unwrap();
        assert_eq!(backend.get("users").unwrap().as_deref(), Some("{}"));
        assert_eq!(backend.len(), 1);

        assert!(backend.remove("users").unwrap());
        assert!(!backend.remove("users").unwrap());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_set_replaces_value() {
        let mut backend = MemoryBackend::with_value("users", "old");
        backend.set("users", "new").unwrap();
        assert_eq!(backend.get("users").unwrap().as_deref(), Some("new"));
        assert_eq!(backend.len(), 1);
    }
}
