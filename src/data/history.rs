//! Recent searches, persisted across sessions
//!
//! The list is kept newest first, holds at most [`HISTORY_LIMIT`] entries and never
//! contains two entries for the same exact coordinates.

use crate::{
    core::{
        config::HistoryConfig,
        constants::{HISTORY_LIMIT, HISTORY_VISIBLE},
        geo::{LatLng, NamedLatLng},
    },
    MapError, Result,
};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl HistoryEntry {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    fn same_place(&self, other: &HistoryEntry) -> bool {
        self.lat == other.lat && self.lng == other.lng
    }
}

impl From<&NamedLatLng> for HistoryEntry {
    fn from(location: &NamedLatLng) -> Self {
        Self {
            name: location.name.clone(),
            kind: location.kind.clone(),
            lat: location.lat(),
            lng: location.lng(),
        }
    }
}

/// Key-value slot storage for serialized history
pub trait HistoryStore {
    /// Raw text stored under `slot`, if any
    fn load(&self, slot: &str) -> Result<Option<String>>;

    fn save(&mut self, slot: &str, data: &str) -> Result<()>;
}

/// Storage that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn save(&mut self, slot: &str, data: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), data.to_string());
        Ok(())
    }
}

/// One `<slot>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.directory.join(format!("{}.json", slot))
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, slot: &str, data: &str) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;
        std::fs::write(self.slot_path(slot), data)?;
        Ok(())
    }
}

/// Browser `localStorage`
#[cfg(feature = "wasm")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "wasm")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| MapError::Storage("localStorage is not available".into()))
    }
}

#[cfg(feature = "wasm")]
impl HistoryStore for LocalStorageStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(slot)
            .map_err(|e| MapError::Storage(format!("reading {}: {:?}", slot, e)))
    }

    fn save(&mut self, slot: &str, data: &str) -> Result<()> {
        Self::storage()?
            .set_item(slot, data)
            .map_err(|e| MapError::Storage(format!("writing {}: {:?}", slot, e)))
    }
}

/// Store for the configured location: a JSON file store when a directory is set,
/// otherwise browser storage on `wasm` builds and process memory elsewhere
pub fn store_for(config: &HistoryConfig) -> Box<dyn HistoryStore> {
    match &config.directory {
        Some(directory) => Box::new(JsonFileStore::new(directory)),
        None => default_store(),
    }
}

#[cfg(feature = "wasm")]
fn default_store() -> Box<dyn HistoryStore> {
    Box::new(LocalStorageStore)
}

#[cfg(not(feature = "wasm"))]
fn default_store() -> Box<dyn HistoryStore> {
    Box::new(MemoryStore::new())
}

/// The recent-search list bound to a storage slot.
///
/// Every mutation is written through to the store. Write failures are logged and
/// the in-memory list stays authoritative.
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
    slot: String,
    store: Box<dyn HistoryStore>,
}

impl std::fmt::Debug for SearchHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistory")
            .field("slot", &self.slot)
            .field("entries", &self.entries)
            .finish()
    }
}

impl SearchHistory {
    /// Loads the list from `slot`. Missing or unreadable data starts an empty list.
    pub fn load(store: Box<dyn HistoryStore>, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let entries = match store.load(&slot) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<HistoryEntry>>(&text) {
                Ok(stored) => {
                    let mut entries: Vec<HistoryEntry> = Vec::with_capacity(stored.len());
                    for entry in stored {
                        if !entries.iter().any(|kept| kept.same_place(&entry)) {
                            entries.push(entry);
                        }
                    }
                    entries.truncate(HISTORY_LIMIT);
                    entries
                }
                Err(e) => {
                    log::warn!("discarding unreadable search history in {}: {}", slot, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("could not load search history from {}: {}", slot, e);
                Vec::new()
            }
        };

        log::debug!("search history loaded with {} entries", entries.len());
        Self {
            entries,
            slot,
            store,
        }
    }

    /// Opens the list described by `config`
    pub fn open(config: &HistoryConfig) -> Self {
        Self::load(store_for(config), config.slot.clone())
    }

    /// A history that is never persisted
    pub fn in_memory() -> Self {
        Self::load(
            Box::new(MemoryStore::new()),
            crate::core::constants::HISTORY_SLOT,
        )
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The newest entries shown under the search box
    pub fn visible(&self) -> &[HistoryEntry] {
        &self.entries[..self.entries.len().min(HISTORY_VISIBLE)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Puts `entry` first, dropping any older entry at the same coordinates
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.retain(|existing| !existing.same_place(&entry));
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
        self.persist();
    }

    /// Removes the entry at `index`; out-of-range indices are ignored
    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.persist();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(MapError::from)
            .and_then(|text| self.store.save(&self.slot, &text));
        if let Err(e) = result {
            log::warn!("could not save search history to {}: {}", self.slot, e);
        }
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::in_memory()
    }
}
