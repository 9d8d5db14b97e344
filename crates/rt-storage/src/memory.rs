use std::sync::Mutex;
use std::time::Duration;

use rt_core::TokenizationResult;

use crate::entry::{CacheMap, DEFAULT_MAX_ENTRIES, DEFAULT_TTL, now_timestamp};
use crate::{Result, ResultStore, StorageError};

/// In-process store with the same expiry and eviction rules as the file store
pub struct MemoryStore {
    map: Mutex<CacheMap>,
    ttl: Duration,
    max_entries: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self {
            map: Mutex::new(CacheMap::new()),
            ttl,
            max_entries,
        }
    }

    pub fn put_at(&self, key: &str, result: &TokenizationResult, timestamp: f64) -> Result<()> {
        let mut map = self.map.lock().map_err(|_| StorageError::Poisoned)?;
        map.insert_at(key, result, timestamp, self.max_entries);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.map.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<TokenizationResult>> {
        let map = self.map.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(map.lookup(key, now_timestamp(), self.ttl).cloned())
    }

    fn put(&self, key: &str, result: &TokenizationResult) -> Result<()> {
        self.put_at(key, result, now_timestamp())
    }
}
