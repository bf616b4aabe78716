//! Saved-query vault.
//!
//! JSON file-based persistent storage for queries the user wants to revisit.
//! The whole collection lives in one file and is rewritten after every
//! mutation (write-through). No other module touches the file.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Vault file name under the data directory.
const VAULT_FILE: &str = "vault.json";

/// One saved query. Serialized as `{"text": ..., "date": <ISO-8601>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub text: String,
    #[serde(rename = "date")]
    pub saved_at: DateTime<Utc>,
}

/// Ordered, de-duplicated store of saved queries backed by one JSON file.
pub struct VaultStore {
    path: PathBuf,
    entries: Vec<SavedQuery>,
}

impl VaultStore {
    /// Open the vault at `path`. A missing or corrupt file yields an empty
    /// vault; persistence problems must never block the tutoring flow.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        Self { path, entries }
    }

    /// Open the vault at the default XDG data location.
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("brainy")
            .join(VAULT_FILE)
    }

    fn load(path: &Path) -> Vec<SavedQuery> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt vault file, starting empty");
                Vec::new()
            }
        }
    }

    /// Append a new entry and write through. Does not de-duplicate; use
    /// [`VaultStore::save_if_absent`] to close the check/save race.
    pub fn save(&mut self, text: impl Into<String>) -> Result<()> {
        self.entries.push(SavedQuery {
            text: text.into(),
            saved_at: Utc::now(),
        });
        self.persist()
    }

    /// Save `text` only if no entry with the same text exists. Check and
    /// append happen in one operation on the in-memory state, so two callers
    /// cannot interleave between them. Returns true when an entry was added.
    pub fn save_if_absent(&mut self, text: &str) -> Result<bool> {
        if self.exists(text) {
            return Ok(false);
        }
        self.save(text)?;
        Ok(true)
    }

    /// Exact, case-sensitive existence check.
    pub fn exists(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.text == text)
    }

    /// Remove the entry at `index` and write through. Out-of-range is a
    /// silent no-op, matching the lenient load path.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Ok(());
        }
        self.entries.remove(index);
        self.persist()
    }

    /// Remove the entry with exactly this text, if present.
    pub fn remove_text(&mut self, text: &str) -> Result<bool> {
        match self.entries.iter().position(|e| e.text == text) {
            Some(index) => {
                self.entries.remove(index);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn entries(&self) -> &[SavedQuery] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create vault directory: {parent:?}"))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write vault file: {:?}", self.path))?;
        Ok(())
    }
}
