//! Composition of the two status-line flavours

use std::path::Path;
use std::time::Duration;

use rt_sources::{GitStatus, git};

use crate::{counter, project};

const SEPARATOR: &str = "  │  ";
const GIT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Richer package detection and a 100-file line sample
    Full,
    /// Shorter timeouts, 50-file sample, JS package managers only
    Simple,
}

impl Variant {
    fn line_sample(&self) -> usize {
        match self {
            Variant::Full => 100,
            Variant::Simple => 50,
        }
    }

    fn lossy_lines(&self) -> bool {
        matches!(self, Variant::Simple)
    }

    fn package_probes(&self) -> usize {
        match self {
            Variant::Full => 5,
            Variant::Simple => 3,
        }
    }

    fn counter_timeout(&self) -> Duration {
        match self {
            Variant::Full => Duration::from_secs(2),
            Variant::Simple => Duration::from_secs(1),
        }
    }
}

/// Everything shown on the line, gathered best-effort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub dir_name: String,
    pub file_count: usize,
    pub line_count: u64,
    pub tokens: Option<String>,
    pub package_manager: String,
    pub branch: Option<String>,
    pub git: Option<GitStatus>,
}

impl StatusInfo {
    pub async fn collect(dir: &Path, variant: Variant) -> Self {
        let files = git::tracked_files(dir, GIT_TIMEOUT).await.unwrap_or_default();
        let line_count = project::estimate_lines(
            dir,
            &files,
            files.len(),
            variant.line_sample(),
            variant.lossy_lines(),
        );

        let tokens = match counter::locate() {
            Some(bin) => counter::token_count(&bin, dir, variant.counter_timeout()).await,
            None => None,
        };

        let branch = git::branch(dir, GIT_TIMEOUT).await.ok();
        let git = git::status_porcelain(dir, GIT_TIMEOUT)
            .await
            .ok()
            .map(|porcelain| GitStatus::parse(&porcelain));

        Self {
            dir_name: project::dir_name(dir),
            file_count: files.len(),
            line_count,
            tokens,
            package_manager: project::package_manager(dir, variant.package_probes()),
            branch,
            git,
        }
    }

    pub fn render(&self, variant: Variant) -> String {
        match variant {
            Variant::Full => self.render_full(),
            Variant::Simple => self.render_simple(),
        }
    }

    fn render_full(&self) -> String {
        let mut left = vec![format!("📁 {}", self.dir_name)];

        let mut file_info = Vec::new();
        if self.file_count > 0 {
            file_info.push(format!("📝 {} files", self.file_count));
        }
        if self.line_count > 0 {
            file_info.push(project::format_lines(self.line_count));
        }
        if let Some(tokens) = &self.tokens {
            file_info.push(format!("{} tokens", tokens));
        }
        if !file_info.is_empty() {
            left.push(file_info.join(" • "));
        }
        left.push(self.package_manager.clone());

        let mut parts = vec![left.join(SEPARATOR)];
        // Without a readable status the whole git section is dropped
        if let Some(status) = &self.git {
            let git_parts = self.git_parts(status);
            if !git_parts.is_empty() {
                parts.push(git_parts.join("  "));
            }
        }

        parts.join(SEPARATOR)
    }

    fn render_simple(&self) -> String {
        let mut line = format!("📁 {}", self.dir_name);

        if self.file_count > 0 {
            line.push_str(&format!(
                "{}📝 {} files • {}",
                SEPARATOR,
                self.file_count,
                project::format_lines(self.line_count)
            ));
            if let Some(tokens) = &self.tokens {
                line.push_str(&format!(" • {} tokens", tokens));
            }
        }

        line.push_str(SEPARATOR);
        line.push_str(&self.package_manager);

        let status = self.git.unwrap_or_default();
        let git_parts = self.git_parts(&status);
        if !git_parts.is_empty() {
            line.push_str(SEPARATOR);
            line.push_str(&git_parts.join("  "));
        }

        line
    }

    fn git_parts(&self, status: &GitStatus) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(branch) = &self.branch {
            parts.push(format!("🌿 {}", branch));
        }
        if status.modified > 0 {
            parts.push(format!("✎ Modified: {}", status.modified));
        }
        if status.untracked > 0 {
            parts.push(format!("➕ New: {}", status.untracked));
        }
        if status.staged > 0 {
            parts.push(format!("↑ Staged: {}", status.staged));
        }
        parts
    }
}

/// Decorated two-line block expected by the host tool
pub fn frame(line: &str) -> String {
    format!("  ┌─  {}\n  └─\n", line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> StatusInfo {
        StatusInfo {
            dir_name: "repo".to_string(),
            file_count: 120,
            line_count: 15_400,
            tokens: Some("507k".to_string()),
            package_manager: "📦 cargo".to_string(),
            branch: Some("main".to_string()),
            git: Some(GitStatus {
                modified: 2,
                staged: 1,
                untracked: 0,
            }),
        }
    }

    #[test]
    fn test_full_layout() {
        assert_eq!(
            info().render(Variant::Full),
            "📁 repo  │  📝 120 files • 15k lines • 507k tokens  │  📦 cargo  │  🌿 main  ✎ Modified: 2  ↑ Staged: 1"
        );
    }

    #[test]
    fn test_full_layout_without_git_status() {
        let info = StatusInfo {
            git: None,
            tokens: None,
            line_count: 0,
            ..info()
        };
        assert_eq!(
            info.render(Variant::Full),
            "📁 repo  │  📝 120 files  │  📦 cargo"
        );
    }

    #[test]
    fn test_full_layout_outside_repository() {
        let info = StatusInfo {
            dir_name: "scratch".to_string(),
            package_manager: "📦".to_string(),
            ..StatusInfo::default()
        };
        assert_eq!(info.render(Variant::Full), "📁 scratch  │  📦");
    }

    #[test]
    fn test_simple_layout() {
        assert_eq!(
            info().render(Variant::Simple),
            "📁 repo  │  📝 120 files • 15k lines • 507k tokens  │  📦 cargo  │  🌿 main  ✎ Modified: 2  ↑ Staged: 1"
        );
    }

    #[test]
    fn test_simple_layout_keeps_branch_without_status() {
        let info = StatusInfo {
            git: None,
            tokens: None,
            ..info()
        };
        assert_eq!(
            info.render(Variant::Simple),
            "📁 repo  │  📝 120 files • 15k lines  │  📦 cargo  │  🌿 main"
        );
    }

    #[test]
    fn test_simple_layout_hides_tokens_without_files() {
        let info = StatusInfo {
            file_count: 0,
            line_count: 0,
            branch: None,
            git: None,
            ..info()
        };
        assert_eq!(info.render(Variant::Simple), "📁 repo  │  📦 cargo");
    }

    #[test]
    fn test_frame() {
        assert_eq!(frame("x"), "  ┌─  x\n  └─\n");
    }

    #[tokio::test]
    async fn test_collect_outside_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("package-lock.json"), "{}").unwrap();

        let info = StatusInfo::collect(dir.path(), Variant::Simple).await;
        assert_eq!(info.file_count, 0);
        assert_eq!(info.line_count, 0);
        assert_eq!(info.package_manager, "📦 npm");
        assert!(info.branch.is_none());
        assert!(info.git.is_none());
    }
}
