use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides the config file location
pub const CONFIG_ENV: &str = "REPO_TOKENS_CONFIG";

/// Overrides the cache file location
pub const CACHE_ENV: &str = "REPO_TOKENS_CACHE";

/// Configuration for repo-tokens (`config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model used when `--model` is not given
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Cache file, defaults to the per-user cache directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Files larger than this many bytes are skipped
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    #[serde(default = "default_git_timeout_secs")]
    pub git_timeout_secs: u64,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            cache: CacheConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
            path: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            git_timeout_secs: default_git_timeout_secs(),
            extensions: default_extensions(),
            ignored_dirs: default_ignored_dirs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_ttl_secs() -> u64 {
    rt_storage::DEFAULT_TTL.as_secs()
}

fn default_max_entries() -> usize {
    rt_storage::DEFAULT_MAX_ENTRIES
}

fn default_max_file_size() -> u64 {
    rt_tokens::DEFAULT_MAX_FILE_SIZE
}

fn default_git_timeout_secs() -> u64 {
    5
}

fn default_extensions() -> Vec<String> {
    rt_sources::DEFAULT_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_ignored_dirs() -> Vec<String> {
    rt_sources::DEFAULT_IGNORED_DIRS
        .iter()
        .map(|d| d.to_string())
        .collect()
}

impl Config {
    /// Load config from the default location; a missing file yields defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Like [`Config::load`], but a broken file only produces a warning
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring config {}: {}", Self::config_path().display(), e);
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        if let Some(dirs) = directories::ProjectDirs::from("com", "repo-tokens", "repo-tokens") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.config/repo-tokens/config.toml")
        }
    }

    /// Cache file: environment override, then config, then the per-user default
    pub fn cache_path(&self) -> PathBuf {
        std::env::var_os(CACHE_ENV)
            .map(PathBuf::from)
            .or_else(|| self.cache.path.clone())
            .unwrap_or_else(rt_storage::JsonFileStore::default_path)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.scan.git_timeout_secs)
    }
}
