//! JSON file-based local store.
//!
//! Keeps all entries in memory and rewrites the whole file on every change,
//! using write-to-temp + rename so a crash never leaves a truncated file.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "access_token": "alice"
//!   }
//! }
//! ```

use crate::domain::error::{ClientError, Result};
use crate::storage::backend::LocalStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file store.
///
/// This type is `Send` but not `Sync`; it is owned by exactly one state
/// holder and mutated from the event loop only.
#[derive(Debug)]
pub struct JsonStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonStore {
    /// Opens the store at `file_path`, loading existing entries if the file
    /// exists. Parent directories are created as needed.
    ///
    /// A file that cannot be parsed is moved aside to `<name>.corrupt` and
    /// the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the
    /// file exists but cannot be read.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            let contents = std::fs::read_to_string(&file_path)?;
            Self::parse(&contents).unwrap_or_else(|e| {
                Self::quarantine(&file_path, &e.to_string());
                StoreData::default()
            })
        } else {
            tracing::debug!("no store file yet, starting empty");
            StoreData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store opened");

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn parse(contents: &str) -> serde_json::Result<StoreData> {
        let data: StoreData = serde_json::from_str(contents)?;

        if data.version > FORMAT_VERSION {
            tracing::warn!(
                version = data.version,
                supported = FORMAT_VERSION,
                "store written by a newer client, reading best-effort"
            );
        }

        Ok(data)
    }

    /// Moves an unparsable file out of the way, keeping it for inspection.
    fn quarantine(path: &Path, reason: &str) {
        let mut aside = path.as_os_str().to_owned();
        aside.push(".corrupt");
        let aside = PathBuf::from(aside);

        tracing::warn!(path = ?path, aside = ?aside, reason, "store file unreadable, starting empty");
        if let Err(e) = std::fs::rename(path, &aside) {
            tracing::warn!(error = %e, "could not move store file aside");
        }
    }

    fn save_to_file(&self, data: &StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ClientError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "store saved");
        Ok(())
    }

    /// Persists `next` and adopts it only once the write succeeded.
    fn commit(&mut self, next: StoreData) -> Result<()> {
        self.save_to_file(&next)?;
        self.data = next;
        Ok(())
    }
}

impl LocalStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        let mut next = self.data.clone();
        next.entries.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_remove", key = %key).entered();

        if !self.data.entries.contains_key(key) {
            return Ok(());
        }

        let mut next = self.data.clone();
        next.entries.remove(key);
        self.commit(next)
    }
}
