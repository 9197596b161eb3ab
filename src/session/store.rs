//! Storage seam for session documents.
//!
//! The engine never talks to a database. A store loads and replaces whole
//! `SessionRecord` documents; locking around load-mutate-save is the
//! store's business.

use rustc_hash::FxHashMap;

use super::profile::{SessionId, SessionRecord};
use crate::core::{BattleError, Result};

/// Whole-document key-value storage.
pub trait SessionStore {
    /// Fetch a record. `Ok(None)` means the session does not exist.
    fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>>;

    /// Replace the stored record.
    fn save(&mut self, id: &SessionId, record: &SessionRecord) -> Result<()>;
}

/// In-memory store holding bincode-encoded documents.
///
/// Encoding on every save keeps it honest: a record that would not
/// survive a real store fails here too.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: FxHashMap<SessionId, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Raw encoded bytes of a stored record.
    #[must_use]
    pub fn raw(&self, id: &SessionId) -> Option<&[u8]> {
        self.documents.get(id).map(Vec::as_slice)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>> {
        self.documents
            .get(id)
            .map(|bytes| bincode::deserialize::<SessionRecord>(bytes).map_err(BattleError::from))
            .transpose()
    }

    fn save(&mut self, id: &SessionId, record: &SessionRecord) -> Result<()> {
        let bytes = bincode::serialize(record)?;
        self.documents.insert(id.clone(), bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CombatantStats;
    use crate::session::PlayerProfile;

    #[test]
    fn test_missing_session_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load(&SessionId::new("nobody")).unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let id = SessionId::new("alice");
        let record = SessionRecord::new(PlayerProfile::new(CombatantStats::new(3, 1, 0, 4), 25, 1));

        store.save(&id, &record).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&id).unwrap(), Some(record));
    }

    #[test]
    fn test_corrupt_document_is_storage_error() {
        let mut store = MemoryStore::new();
        let id = SessionId::new("alice");
        store.documents.insert(id.clone(), vec![0xff, 0x01]);

        assert!(matches!(store.load(&id), Err(BattleError::Storage(_))));
    }
}
