use crate::history_store::{HistoryStore, HISTORY_LIMIT};
use crate::pack::Pack;
use crate::store::KeyValueStore;

/// Most-recent-first list of generated packs, bounded and keyed by `pack_id`.
pub struct HistoryCache<S> {
    entries: Vec<Pack>,
    persistence: HistoryStore<S>,
}

impl<S: KeyValueStore> HistoryCache<S> {
    /// Builds the cache from whatever the store currently holds.
    pub fn load(persistence: HistoryStore<S>) -> Self {
        let entries = persistence.load();
        Self {
            entries,
            persistence,
        }
    }

    pub fn add(&mut self, pack: Pack) {
        self.entries.retain(|entry| entry.pack_id != pack.pack_id);
        self.entries.insert(0, pack);
        self.entries.truncate(HISTORY_LIMIT);
        self.persistence.save(&self.entries);
    }

    pub fn find(&self, pack_id: &str) -> Option<&Pack> {
        self.entries.iter().find(|entry| entry.pack_id == pack_id)
    }

    pub fn all(&self) -> &[Pack] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Pack> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn persistence(&self) -> &HistoryStore<S> {
        &self.persistence
    }
}
