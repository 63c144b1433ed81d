use crate::domain::model::Ledger;
use crate::domain::ports::{KeyValueStore, LedgerStore};
use crate::utils::error::{Result, ScoreError};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORAGE_KEY: &str = "rounds";

/// One JSON file per key under a base directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: String,
}

impl FileStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        Path::new(&self.base_path).join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Keeps the ledger as a JSON array under a single key.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore<K: KeyValueStore> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> JsonLedgerStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &K {
        &self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    fn discard(&mut self, reason: &dyn std::fmt::Display) -> Result<Option<Ledger>> {
        tracing::warn!("⚠️ Discarding unreadable saved game under '{}': {}", self.key, reason);
        if let Err(e) = self.kv.remove(&self.key) {
            tracing::warn!("⚠️ Could not remove unreadable saved game: {}", e);
        }
        Ok(None)
    }
}

impl<K: KeyValueStore> LedgerStore for JsonLedgerStore<K> {
    fn load(&mut self) -> Result<Option<Ledger>> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            // 檔案內容不是 UTF-8 時與格式錯誤一樣直接捨棄
            Err(ScoreError::IoError(e)) if e.kind() == ErrorKind::InvalidData => {
                return self.discard(&e);
            }
            Err(e) => return Err(e),
        };

        // `null` 與空陣列都視為沒有存檔
        match serde_json::from_str::<Option<Ledger>>(&raw) {
            Ok(ledger) => Ok(ledger.filter(|l| !l.is_empty())),
            Err(e) => self.discard(&e),
        }
    }

    fn save(&mut self, ledger: &Ledger) -> Result<()> {
        let data = serde_json::to_string(ledger)?;
        self.kv.set(&self.key, &data)?;
        tracing::debug!("Saved {} rounds under '{}'", ledger.len(), self.key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.kv.remove(&self.key)?;
        tracing::debug!("Cleared saved game under '{}'", self.key);
        Ok(())
    }
}
