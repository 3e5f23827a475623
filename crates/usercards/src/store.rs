//! The record store: an in-memory `email -> Record` mapping mirrored to a
//! [`Backend`] as one serialized JSON object.
//!
//! Every mutation re-serializes the whole mapping and writes it under the
//! namespace key. If that write fails, the in-memory mapping keeps the new
//! state and the caller gets [`Error::Persist`].

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::storage::Backend;

/// Records keyed by email, in insertion order.
pub type Records = IndexMap<String, Record>;

/// In-memory record mapping with a persisted mirror.
///
/// Invariant: for every entry, `records[key].email == key`.
#[derive(Debug)]
pub struct RecordStore {
    backend: Box<dyn Backend>,
    namespace_key: String,
    records: Records,
}

impl RecordStore {
    /// Open a store over `backend`, loading the mapping stored under
    /// `namespace_key`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read. A missing
    /// or malformed snapshot yields an empty store.
    pub fn open(backend: Box<dyn Backend>, namespace_key: impl Into<String>) -> Result<Self> {
        let namespace_key = namespace_key.into();
        let records = load(backend.as_ref(), &namespace_key)?;
        Ok(Self {
            backend,
            namespace_key,
            records,
        })
    }

    /// The backend key holding the serialized mapping.
    #[must_use]
    pub fn namespace_key(&self) -> &str {
        &self.namespace_key
    }

    /// The current mapping.
    #[must_use]
    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Look up a record by email.
    #[must_use]
    pub fn get(&self, email: &str) -> Option<&Record> {
        self.records.get(email)
    }

    /// Check whether a record exists for `email`.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.records.contains_key(email)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Record)> {
        self.records.iter()
    }

    /// Insert `record` under its email, or overwrite the existing entry in
    /// place, then persist.
    ///
    /// Returns `true` if the record was newly inserted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the write fails; the mapping is updated
    /// regardless.
    pub fn upsert(&mut self, record: Record) -> Result<bool> {
        let inserted = self.records.insert(record.email.clone(), record).is_none();
        self.persist()?;
        Ok(inserted)
    }

    /// Remove the record for `email` if present, then persist.
    ///
    /// Returns the removed record. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the write fails.
    pub fn remove(&mut self, email: &str) -> Result<Option<Record>> {
        let removed = self.records.shift_remove(email);
        self.persist()?;
        Ok(removed)
    }

    /// Serialize the whole mapping and write it under the namespace key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if serialization or the write fails.
    pub fn persist(&mut self) -> Result<()> {
        let snapshot = serde_json::to_string(&self.records)
            .map_err(|e| Error::persist(&self.namespace_key, e.to_string()))?;

        self.backend
            .set(&self.namespace_key, &snapshot)
            .map_err(|e| match e {
                Error::Persist { .. } => e,
                other => Error::persist(&self.namespace_key, other.to_string()),
            })?;

        debug!(
            key = %self.namespace_key,
            records = self.records.len(),
            "Persisted records"
        );
        Ok(())
    }

    /// Drop every record and erase the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the snapshot cannot be removed; the
    /// mapping is emptied regardless.
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.backend
            .remove(&self.namespace_key)
            .map_err(|e| Error::persist(&self.namespace_key, e.to_string()))?;
        Ok(())
    }
}

/// Read the snapshot under `key`.
///
/// Missing or malformed data yields an empty mapping; entries whose stored
/// email disagrees with their key take the key as their email.
fn load(backend: &dyn Backend, key: &str) -> Result<Records> {
    let Some(snapshot) = backend.get(key)? else {
        debug!(key, "No persisted records");
        return Ok(Records::new());
    };

    let mut records: Records = match serde_json::from_str::<Option<Records>>(&snapshot) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            warn!(key, error = %e, "Persisted records are malformed, starting empty");
            return Ok(Records::new());
        }
    };

    for (email, record) in &mut records {
        if record.email != *email {
            warn!(key = %email, stored = %record.email, "Record email disagrees with its key");
            record.email.clone_from(email);
        }
    }

    debug!(key, records = records.len(), "Loaded records");
    Ok(records)
}
