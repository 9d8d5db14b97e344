//! Nested `repo-tokens --simple` invocation

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

/// Overrides where the counter binary is looked up
pub const BIN_ENV: &str = "REPO_TOKENS_BIN";

const BIN_NAME: &str = "repo-tokens";

/// `REPO_TOKENS_BIN`, then a sibling of the running executable, then `PATH`
pub fn locate() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(BIN_ENV) {
        return Some(PathBuf::from(path));
    }

    let sibling = std::env::current_exe().ok().and_then(|exe| {
        exe.parent()
            .map(|dir| dir.join(format!("{}{}", BIN_NAME, std::env::consts::EXE_SUFFIX)))
    });
    if let Some(path) = sibling.filter(|p| p.is_file()) {
        return Some(path);
    }

    which::which(BIN_NAME).ok()
}

/// Formatted token count for `dir`, or `None` on any failure or timeout
pub async fn token_count(bin: &Path, dir: &Path, timeout: Duration) -> Option<String> {
    let mut command = Command::new(bin);
    // A relative `dir` must not be resolved against itself
    if dir.is_dir() {
        command.current_dir(dir).arg(".");
    } else {
        command.arg(dir);
    }
    command
        .arg("--simple")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            debug!("Failed to start {}: {}", bin.display(), e);
            return None;
        }
    };

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!("{} failed: {}", bin.display(), e);
            return None;
        }
        Err(_) => {
            debug!("{} timed out after {:?}", bin.display(), timeout);
            return None;
        }
    };

    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!stdout.is_empty()).then_some(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_binary_is_none() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("no-such-counter");

        assert_eq!(token_count(&bin, dir.path(), Duration::from_secs(1)).await, None);
    }

    #[tokio::test]
    async fn test_reads_trimmed_stdout() {
        let Ok(echo) = which::which("echo") else {
            return;
        };
        let dir = TempDir::new().unwrap();

        let out = token_count(&echo, dir.path(), Duration::from_secs(5)).await;
        assert_eq!(out, Some(". --simple".to_string()));
    }

    #[tokio::test]
    async fn test_relative_directory_is_counted_from_inside() {
        let Ok(echo) = which::which("echo") else {
            return;
        };
        // Test binaries run from the package root, where `src` exists
        let relative = Path::new("src");
        assert!(relative.is_dir());

        let out = token_count(&echo, relative, Duration::from_secs(5)).await;
        assert_eq!(out, Some(". --simple".to_string()));
    }

    #[tokio::test]
    async fn test_file_target_is_passed_as_is() {
        let Ok(echo) = which::which("echo") else {
            return;
        };
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.md");
        std::fs::write(&file, "hello world").unwrap();

        let out = token_count(&echo, &file, Duration::from_secs(5)).await;
        assert_eq!(out, Some(format!("{} --simple", file.display())));
    }

    #[tokio::test]
    async fn test_failing_or_silent_counter_is_none() {
        let (Ok(failing), Ok(silent)) = (which::which("false"), which::which("true")) else {
            return;
        };
        let dir = TempDir::new().unwrap();

        assert_eq!(token_count(&failing, dir.path(), Duration::from_secs(5)).await, None);
        assert_eq!(token_count(&silent, dir.path(), Duration::from_secs(5)).await, None);
    }
}
