use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension bucket for files without one
pub const UNKNOWN_EXTENSION: &str = "unknown";

/// Outcome of one counting run over a file or directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizationResult {
    pub total_tokens: u64,
    pub file_count: u64,
    pub formatted: String,
    #[serde(default)]
    pub skipped: SkipCounts,
    #[serde(default)]
    pub ext_totals: BTreeMap<String, u64>,
    pub encoder: String,
    pub model: String,
    #[serde(default)]
    pub cached: bool,
}

impl TokenizationResult {
    /// Copy handed back on a cache hit; the stored entry keeps `cached = false`
    pub fn as_cached(&self) -> Self {
        Self {
            cached: true,
            ..self.clone()
        }
    }

    /// Integer average over counted files, 0 when nothing was counted
    pub fn average_per_file(&self) -> u64 {
        self.total_tokens.checked_div(self.file_count).unwrap_or(0)
    }

    /// Extensions ordered by token total, largest first
    pub fn top_extensions(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .ext_totals
            .iter()
            .map(|(ext, tokens)| (ext.as_str(), *tokens))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }
}

/// Why a file contributed zero tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    Large,
    Empty,
    Error,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Large => "large",
            SkipReason::Empty => "empty",
            SkipReason::Error => "error",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-reason skip counters, serialized as `{"large": n, "empty": n, "error": n}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    #[serde(default)]
    pub large: u64,
    #[serde(default)]
    pub empty: u64,
    #[serde(default)]
    pub error: u64,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Large => self.large += 1,
            SkipReason::Empty => self.empty += 1,
            SkipReason::Error => self.error += 1,
        }
    }

    pub fn get(&self, reason: SkipReason) -> u64 {
        match reason {
            SkipReason::Large => self.large,
            SkipReason::Empty => self.empty,
            SkipReason::Error => self.error,
        }
    }

    pub fn total(&self) -> u64 {
        self.large + self.empty + self.error
    }

    /// `"2 large, 1 error"`, or `"0"` when nothing was skipped
    pub fn summary(&self) -> String {
        if self.total() == 0 {
            return "0".to_string();
        }

        [SkipReason::Large, SkipReason::Empty, SkipReason::Error]
            .into_iter()
            .filter(|reason| self.get(*reason) > 0)
            .map(|reason| format!("{} {}", self.get(reason), reason))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A candidate file, relative to the scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub extension: String,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = extension_bucket(&path);
        Self { path, extension }
    }
}

/// Lower-cased extension with its leading dot, or [`UNKNOWN_EXTENSION`]
pub fn extension_bucket(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_else(|| UNKNOWN_EXTENSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenizationResult {
        TokenizationResult {
            total_tokens: 1_500,
            file_count: 3,
            formatted: "1.5k".to_string(),
            skipped: SkipCounts::default(),
            ext_totals: BTreeMap::from([
                (".md".to_string(), 200),
                (".py".to_string(), 1_000),
                (".json".to_string(), 300),
                (UNKNOWN_EXTENSION.to_string(), 0),
            ]),
            encoder: "o200k_base".to_string(),
            model: "gpt-4o".to_string(),
            cached: false,
        }
    }

    #[test]
    fn test_as_cached_leaves_original() {
        let result = sample();
        let hit = result.as_cached();
        assert!(hit.cached);
        assert!(!result.cached);
        assert_eq!(hit.total_tokens, result.total_tokens);
    }

    #[test]
    fn test_average_and_top_extensions() {
        let result = sample();
        assert_eq!(result.average_per_file(), 500);
        assert_eq!(result.top_extensions(2), vec![(".py", 1_000), (".json", 300)]);

        let empty = TokenizationResult {
            file_count: 0,
            total_tokens: 0,
            ..sample()
        };
        assert_eq!(empty.average_per_file(), 0);
    }

    #[test]
    fn test_skip_summary() {
        let mut skipped = SkipCounts::default();
        assert_eq!(skipped.summary(), "0");

        skipped.record(SkipReason::Large);
        skipped.record(SkipReason::Large);
        skipped.record(SkipReason::Error);
        assert_eq!(skipped.summary(), "2 large, 1 error");
        assert_eq!(skipped.total(), 3);
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["skipped"]["large"], 0);
        assert_eq!(json["ext_totals"][".py"], 1_000);
        assert_eq!(json["cached"], false);

        let parsed: TokenizationResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_extension_bucket() {
        assert_eq!(FileRecord::new("src/App.TSX").extension, ".tsx");
        assert_eq!(FileRecord::new("README.md").extension, ".md");
        assert_eq!(FileRecord::new("Makefile").extension, UNKNOWN_EXTENSION);
        assert_eq!(FileRecord::new(".bashrc").extension, UNKNOWN_EXTENSION);
    }
}
