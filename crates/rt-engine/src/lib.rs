use std::collections::BTreeMap;
use std::path::Path;

use rt_core::{Error, FileRecord, Result, SkipCounts, TokenizationResult, format_tokens};
use rt_sources::FileSelector;
use rt_storage::ResultStore;
use rt_tokens::{DEFAULT_MAX_FILE_SIZE, Encoder, EncoderRegistry, FileCount, count_file};
use tracing::debug;

/// Counts tokens for a file or directory, consulting the result cache first.
///
/// Owns the per-run encoder memo and the cache store, so one `Scanner` is
/// built per process.
pub struct Scanner {
    registry: EncoderRegistry,
    selector: FileSelector,
    store: Option<Box<dyn ResultStore>>,
    max_file_size: u64,
}

impl Scanner {
    pub fn new(selector: FileSelector, store: Box<dyn ResultStore>) -> Self {
        Self {
            registry: EncoderRegistry::new(),
            selector,
            store: Some(store),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Scanner that neither reads nor writes the cache
    pub fn uncached(selector: FileSelector) -> Self {
        Self {
            registry: EncoderRegistry::new(),
            selector,
            store: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub async fn scan(&mut self, path: &Path, model: &str) -> Result<TokenizationResult> {
        let root = std::fs::canonicalize(path)
            .map_err(|_| Error::PathNotFound(path.display().to_string()))?;
        let key = root.to_string_lossy().to_string();

        if let Some(hit) = self.cached(&key) {
            debug!("Cache hit for {}", key);
            return Ok(hit.as_cached());
        }
        debug!("Cache miss for {}", key);

        let encoder = self.registry.resolve(model)?;
        let mut tally = Tally::default();

        if root.is_file() {
            let count = count_file(&root, &encoder, self.max_file_size).await;
            tally.record(&FileRecord::new(root.as_path()).extension, count);
        } else {
            let files = self.selector.select(&root).await;
            for record in files {
                let full_path = root.join(&record.path);
                if !is_regular_file(&full_path).await {
                    continue;
                }
                let count = count_file(&full_path, &encoder, self.max_file_size).await;
                tally.record(&record.extension, count);
            }
        }

        let result = tally.finish(&encoder, model);
        debug!(
            "Counted {} tokens in {} files under {}",
            result.total_tokens, result.file_count, key
        );

        if let Some(store) = &self.store {
            if let Err(e) = store.put(&key, &result) {
                debug!("Failed to cache result for {}: {}", key, e);
            }
        }

        Ok(result)
    }

    fn cached(&self, key: &str) -> Option<TokenizationResult> {
        let store = self.store.as_ref()?;
        match store.get(key) {
            Ok(hit) => hit,
            Err(e) => {
                debug!("Treating unreadable cache as miss: {}", e);
                None
            }
        }
    }
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

#[derive(Default)]
struct Tally {
    total_tokens: u64,
    file_count: u64,
    skipped: SkipCounts,
    ext_totals: BTreeMap<String, u64>,
}

impl Tally {
    fn record(&mut self, extension: &str, count: FileCount) {
        if let Some(reason) = count.skipped {
            self.skipped.record(reason);
        }
        if count.tokens > 0 {
            self.total_tokens += count.tokens;
            self.file_count += 1;
            *self.ext_totals.entry(extension.to_string()).or_default() += count.tokens;
        }
    }

    fn finish(self, encoder: &Encoder, model: &str) -> TokenizationResult {
        TokenizationResult {
            total_tokens: self.total_tokens,
            file_count: self.file_count,
            formatted: format_tokens(self.total_tokens),
            skipped: self.skipped,
            ext_totals: self.ext_totals,
            encoder: encoder.name().to_string(),
            model: model.to_string(),
            cached: false,
        }
    }
}
