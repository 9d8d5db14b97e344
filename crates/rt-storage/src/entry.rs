use std::collections::BTreeMap;
use std::time::Duration;

use rt_core::TokenizationResult;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How long a stored result stays valid
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Most recent entries kept in the store
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Wall-clock time as fractional epoch seconds
pub fn now_timestamp() -> f64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: f64,
    pub result: TokenizationResult,
}

impl CacheEntry {
    /// Valid while `now - timestamp < ttl`, with no clock-skew correction
    pub fn is_fresh(&self, now: f64, ttl: Duration) -> bool {
        now - self.timestamp < ttl.as_secs_f64()
    }
}

/// Absolute path -> entry, the on-disk shape of the cache file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheMap {
    entries: BTreeMap<String, CacheEntry>,
}

impl CacheMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &str, now: f64, ttl: Duration) -> Option<&TokenizationResult> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, ttl))
            .map(|entry| &entry.result)
    }

    /// Insert or overwrite `key`, then keep only the `max_entries` newest entries
    pub fn insert_at(
        &mut self,
        key: &str,
        result: &TokenizationResult,
        timestamp: f64,
        max_entries: usize,
    ) {
        let result = TokenizationResult {
            cached: false,
            ..result.clone()
        };
        self.entries
            .insert(key.to_string(), CacheEntry { timestamp, result });
        self.evict(max_entries);
    }

    fn evict(&mut self, max_entries: usize) {
        if self.entries.len() <= max_entries {
            return;
        }

        let mut by_age: Vec<(String, f64)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.timestamp))
            .collect();
        by_age.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (key, _) in by_age.into_iter().skip(max_entries) {
            self.entries.remove(&key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
