//! Persisted logbook state
//!
//! The whole state is one JSON document. It is loaded once, mirrored in
//! memory and written back after every mutation.

use serde::{Deserialize, Serialize};
use shack_common::{ContactRecord, Locale};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::contest::DEFAULT_CONTEST;

pub const STATE_FILE: &str = "state.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("state document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Cabrillo `CATEGORY-*` header values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabrilloCategory {
    pub operator: String,
    pub band: String,
    pub mode: String,
    pub power: String,
}

impl Default for CabrilloCategory {
    fn default() -> Self {
        Self {
            operator: "SINGLE-OP".to_string(),
            band: "ALL".to_string(),
            mode: "MIXED".to_string(),
            power: "LOW".to_string(),
        }
    }
}

/// Last used form values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSelections {
    pub contest: String,
    pub mode: String,
    pub band: String,
    pub rst_sent: String,
    /// Stored upper-cased
    pub region_code: String,
    pub category: CabrilloCategory,
}

impl Default for FormSelections {
    fn default() -> Self {
        Self {
            contest: DEFAULT_CONTEST.to_string(),
            mode: "SSB".to_string(),
            band: "20m".to_string(),
            rst_sent: "59".to_string(),
            region_code: String::new(),
            category: CabrilloCategory::default(),
        }
    }
}

/// Operator details for the Cabrillo header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestInfo {
    pub name: String,
    pub address: String,
    pub soapbox: String,
}

impl ContestInfo {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.address.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Logged QSOs, oldest first
    pub contacts: Vec<ContactRecord>,
    /// Next serial to send, keyed by mode or `contest/mode`
    pub serials: BTreeMap<String, u32>,
    pub selections: FormSelections,
    /// Last free-text exchange per contest id
    pub free_text_exchange: BTreeMap<String, String>,
    pub contest_info: ContestInfo,
    pub locale: Locale,
}

/// Raw storage for the serialized state document
pub trait StateBackend: Send {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&mut self, document: &str) -> Result<(), StoreError>;
}

/// Keeps the document in a JSON file
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/state.json`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            tracing::debug!("State file does not exist: {:?}", self.path);
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, document: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // Write then rename so a crash never leaves half a document behind
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, document)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same document.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Arc<Mutex<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stored document, if any
    pub fn snapshot(&self) -> Option<String> {
        self.document.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&mut self, document: &str) -> Result<(), StoreError> {
        if let Ok(mut stored) = self.document.lock() {
            *stored = Some(document.to_string());
        }
        Ok(())
    }
}

/// In-memory mirror of the persisted state
pub struct StateStore<B: StateBackend> {
    backend: B,
    state: PersistedState,
}

impl<B: StateBackend> StateStore<B> {
    /// Load the state once from `backend`; an empty backend yields defaults.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let state = match backend.load()? {
            Some(document) if !document.trim().is_empty() => serde_json::from_str(&document)?,
            _ => PersistedState::default(),
        };
        tracing::debug!("Loaded state with {} contacts", state.contacts.len());
        Ok(Self { backend, state })
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// Apply `mutate` and flush. The mirror only changes once the flush succeeded.
    pub fn update<R>(
        &mut self,
        mutate: impl FnOnce(&mut PersistedState) -> R,
    ) -> Result<R, StoreError> {
        let mut next = self.state.clone();
        let result = mutate(&mut next);
        let document = serde_json::to_string_pretty(&next)?;
        self.backend.save(&document)?;
        self.state = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend;

    impl StateBackend for FailingBackend {
        fn load(&self) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn save(&mut self, _document: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_open_empty_uses_defaults() {
        let store = StateStore::open(MemoryBackend::new()).unwrap();
        assert!(store.state().contacts.is_empty());
        assert_eq!(store.state().selections.contest, "generic-serial");
        assert_eq!(store.state().selections.category.power, "LOW");
    }

    #[test]
    fn test_update_flushes_to_backend() {
        let backend = MemoryBackend::new();
        let mut store = StateStore::open(backend.clone()).unwrap();
        store.update(|s| s.locale = Locale::Fi).unwrap();

        let reopened = StateStore::open(backend).unwrap();
        assert_eq!(reopened.state().locale, Locale::Fi);
    }

    #[test]
    fn test_failed_flush_keeps_mirror() {
        let mut store = StateStore::open(FailingBackend).unwrap();
        assert!(store.update(|s| s.serials.insert("CW".to_string(), 5)).is_err());
        assert!(store.state().serials.is_empty());
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::in_dir(dir.path().join("nested"));
        let mut store = StateStore::open(backend.clone()).unwrap();
        store
            .update(|s| s.contest_info.name = "Matti Meikäläinen".to_string())
            .unwrap();

        assert!(backend.path().exists());
        let reopened = StateStore::open(backend).unwrap();
        assert_eq!(reopened.state().contest_info.name, "Matti Meikäläinen");
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let mut backend = MemoryBackend::new();
        backend.save("{not json").unwrap();
        assert!(matches!(
            StateStore::open(backend),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let mut backend = MemoryBackend::new();
        backend.save(r#"{"serials":{"CW":12}}"#).unwrap();
        let store = StateStore::open(backend).unwrap();
        assert_eq!(store.state().serials.get("CW"), Some(&12));
        assert_eq!(store.state().selections.mode, "SSB");
    }
}
