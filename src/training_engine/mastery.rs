//! Per-topic mastery counters and the single persisted slot behind them.
//!
//! A topic's value starts at 0, rises by [`MASTERY_INCREMENT`] after every
//! successful generation round trip and saturates at [`MASTERY_CAP`]. There
//! is no decrement and no reset. The whole mapping is written back after each
//! change; a missing or unreadable slot loads as an empty mapping.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::training_engine::{error::MasteryError, models::MasteryStatus};

/// Name of the persisted slot.
pub const MASTERY_SLOT: &str = "statarch_mastery";
pub const MASTERY_INCREMENT: u8 = 5;
pub const MASTERY_CAP: u8 = 100;

/// Topic id → value in `0..=100`.
pub type MasteryRecord = BTreeMap<String, u8>;

/// Storage for the serialized mastery mapping. `load` returns `Ok(None)` when
/// nothing has been saved yet.
pub trait MasteryStore {
    fn load(&self) -> Result<Option<MasteryRecord>, MasteryError>;
    fn save(&self, record: &MasteryRecord) -> Result<(), MasteryError>;
}

/// In-process slot holding the serialized blob, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary (possibly corrupt) serialized blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        MemoryStore { blob: Mutex::new(Some(blob.into())) }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl MasteryStore for MemoryStore {
    fn load(&self) -> Result<Option<MasteryRecord>, MasteryError> {
        match self.blob() {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, record: &MasteryRecord) -> Result<(), MasteryError> {
        let json = serde_json::to_string(record)?;
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }
}

/// JSON file slot. Saves write a sibling temp file and rename it over the
/// slot, so a reader never sees a half-written mapping.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// `<dir>/statarch_mastery.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{MASTERY_SLOT}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MasteryStore for JsonFileStore {
    fn load(&self) -> Result<Option<MasteryRecord>, MasteryError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, record: &MasteryRecord) -> Result<(), MasteryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Owns the mastery mapping and keeps its store in sync.
#[derive(Debug)]
pub struct MasteryTracker<M: MasteryStore> {
    store: M,
    record: MasteryRecord,
}

impl<M: MasteryStore> MasteryTracker<M> {
    /// Read the persisted mapping. Never fails: a missing or corrupt slot
    /// starts the tracker empty.
    pub fn load(store: M) -> Self {
        let record = match store.load() {
            Ok(Some(mut record)) => {
                for value in record.values_mut() {
                    *value = (*value).min(MASTERY_CAP);
                }
                record
            }
            Ok(None) => MasteryRecord::new(),
            Err(e) => {
                warn!(error = %e, "mastery slot unreadable, starting empty");
                MasteryRecord::new()
            }
        };
        MasteryTracker { store, record }
    }

    pub fn value(&self, topic_id: &str) -> u8 {
        self.record.get(topic_id).copied().unwrap_or(0)
    }

    pub fn status(&self, topic_id: &str) -> MasteryStatus {
        MasteryStatus::from_value(self.value(topic_id))
    }

    pub fn record(&self) -> &MasteryRecord {
        &self.record
    }

    pub fn store(&self) -> &M {
        &self.store
    }

    /// Bump `topic_id` by one increment, persist, and return the new value.
    ///
    /// A failed save is logged; the in-memory value keeps the increment.
    pub fn on_generation_success(&mut self, topic_id: &str) -> u8 {
        let value = self.record.entry(topic_id.to_string()).or_insert(0);
        *value = value.saturating_add(MASTERY_INCREMENT).min(MASTERY_CAP);
        let value = *value;
        debug!(topic_id, value, "mastery updated");

        if let Err(e) = self.store.save(&self.record) {
            warn!(error = %e, topic_id, "failed to persist mastery");
        }
        value
    }
}
