//! Candidate file enumeration: git index first, filtered directory walk otherwise

use std::path::Path;
use std::time::Duration;

use rt_core::FileRecord;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::git;

/// Script, markup and config types worth counting
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".py", ".md", ".mdx", ".json", ".yaml", ".yml", ".java",
];

/// Dependency caches and build output never descended into by the walk
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    "dist",
    "build",
    "coverage",
    "venv",
];

pub struct FileSelector {
    extensions: Vec<String>,
    ignored_dirs: Vec<String>,
    git_timeout: Duration,
}

impl FileSelector {
    pub fn new(extensions: Vec<String>, ignored_dirs: Vec<String>, git_timeout: Duration) -> Self {
        Self {
            extensions,
            ignored_dirs,
            git_timeout,
        }
    }

    /// Files under `root`, as paths relative to it. Order is unspecified.
    pub async fn select(&self, root: &Path) -> Vec<FileRecord> {
        match git::tracked_files(root, self.git_timeout).await {
            Ok(files) => {
                let selected: Vec<FileRecord> = files
                    .into_iter()
                    .filter(|path| self.is_allowed(path))
                    .map(FileRecord::new)
                    .collect();
                debug!("git ls-files selected {} files in {}", selected.len(), root.display());
                selected
            }
            Err(e) => {
                debug!("Falling back to directory walk for {}: {}", root.display(), e);
                self.walk(root)
            }
        }
    }

    /// Recursive walk skipping hidden entries and ignored directories
    pub fn walk(&self, root: &Path) -> Vec<FileRecord> {
        WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry))
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_type().is_dir())
            .filter(|entry| entry.file_name().to_str().is_some_and(|name| self.is_allowed(name)))
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(root)
                    .ok()
                    .map(|relative| FileRecord::new(relative.to_path_buf()))
            })
            .collect()
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };
        if name.starts_with('.') {
            return true;
        }
        entry.file_type().is_dir() && self.ignored_dirs.iter().any(|dir| dir == name)
    }
}

impl Default for FileSelector {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            DEFAULT_IGNORED_DIRS.iter().map(|d| d.to_string()).collect(),
            Duration::from_secs(5),
        )
    }
}
