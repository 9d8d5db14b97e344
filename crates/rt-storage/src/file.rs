//! Single JSON file shared by all invocations

use std::path::{Path, PathBuf};
use std::time::Duration;

use rt_core::TokenizationResult;
use tracing::debug;

use crate::entry::{CacheMap, DEFAULT_MAX_ENTRIES, DEFAULT_TTL, now_timestamp};
use crate::{Result, ResultStore};

/// Cache file store. No locking: concurrent writers race and the last one wins.
pub struct JsonFileStore {
    path: PathBuf,
    ttl: Duration,
    max_entries: usize,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Per-user default location
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "repo-tokens", "repo-tokens") {
            dirs.cache_dir().join("cache.json")
        } else if let Some(base) = directories::BaseDirs::new() {
            base.home_dir().join(".cache").join("repo-tokens-cache.json")
        } else {
            PathBuf::from(".repo-tokens-cache.json")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Current contents; a missing file is an empty map
    pub fn load(&self) -> Result<CacheMap> {
        if !self.path.exists() {
            return Ok(CacheMap::new());
        }
        let content = std::fs::read(&self.path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    fn save(&self, map: &CacheMap) -> Result<()> {
        self.ensure_parent()?;
        std::fs::write(&self.path, serde_json::to_vec(map)?)?;
        Ok(())
    }

    /// Write `result` under `key` stamped with `timestamp`
    pub fn put_at(&self, key: &str, result: &TokenizationResult, timestamp: f64) -> Result<()> {
        let mut map = self.load().unwrap_or_else(|e| {
            debug!("Discarding unreadable cache {}: {}", self.path.display(), e);
            CacheMap::new()
        });
        map.insert_at(key, result, timestamp, self.max_entries);
        self.save(&map)
    }
}

impl ResultStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<TokenizationResult>> {
        self.ensure_parent()?;
        let map = self.load()?;
        Ok(map.lookup(key, now_timestamp(), self.ttl).cloned())
    }

    fn put(&self, key: &str, result: &TokenizationResult) -> Result<()> {
        self.put_at(key, result, now_timestamp())
    }
}
