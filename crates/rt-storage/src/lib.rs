//! Result cache for repo-tokens
//!
//! This crate provides:
//! - The [`ResultStore`] interface used by the scanner
//! - A JSON file store shared by every invocation of the tool
//! - An in-memory store with the same expiry and eviction rules

pub mod entry;
pub mod error;
pub mod file;
pub mod memory;

pub use entry::{CacheEntry, CacheMap, DEFAULT_MAX_ENTRIES, DEFAULT_TTL, now_timestamp};
pub use error::{Result, StorageError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use rt_core::TokenizationResult;

/// Narrow get/put interface over persisted results, keyed by absolute path
pub trait ResultStore: Send + Sync {
    /// A result younger than the store's TTL, if any
    fn get(&self, key: &str) -> Result<Option<TokenizationResult>>;

    /// Record a fresh result with the current timestamp
    fn put(&self, key: &str, result: &TokenizationResult) -> Result<()>;
}
