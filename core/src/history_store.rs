use std::collections::HashSet;

use crate::pack::Pack;
use crate::store::KeyValueStore;

pub const HISTORY_STORAGE_KEY: &str = "tohu-kaiako-history";
pub const HISTORY_LIMIT: usize = 7;

/// Reads and writes the saved pack list under a single key.
///
/// Loading keeps the first copy of any repeated `pack_id`. Both directions
/// are fail-soft: a broken or missing store behaves like an
/// empty history and write failures are only logged.
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&self, entries: &[Pack]) {
        let slim = &entries[..entries.len().min(HISTORY_LIMIT)];
        let raw = match serde_json::to_string(slim) {
            Ok(raw) => raw,
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                {
                    gloo::console::warn!("history: encode failed", _err.to_string());
                }
                return;
            }
        };
        if let Err(_err) = self.store.set(HISTORY_STORAGE_KEY, &raw) {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::warn!("history: unable to save", _err.to_string());
            }
        }
    }

    pub fn load(&self) -> Vec<Pack> {
        let raw = match self.store.get(HISTORY_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                {
                    gloo::console::warn!("history: unable to load", _err.to_string());
                }
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Vec<Pack>>(&raw) {
            Ok(mut entries) => {
                let mut seen = HashSet::new();
                entries.retain(|entry| seen.insert(entry.pack_id.clone()));
                entries.truncate(HISTORY_LIMIT);
                entries
            }
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                {
                    gloo::console::warn!("history: discarding unreadable entries", _err.to_string());
                }
                Vec::new()
            }
        }
    }
}
