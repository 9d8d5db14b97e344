//! Git queries through the command line, each bounded by a timeout

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found")]
    NotInstalled,

    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Run `git <args>` in `dir` and return its stdout
pub async fn run(dir: &Path, args: &[&str], timeout: Duration) -> Result<String> {
    let git = which::which("git").map_err(|_| GitError::NotInstalled)?;
    let command = args.join(" ");

    let child = Command::new(git)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| GitError::Timeout {
            command: command.clone(),
            timeout,
        })??;

    if !output.status.success() {
        return Err(GitError::Failed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Paths in the index, relative to `dir`
pub async fn tracked_files(dir: &Path, timeout: Duration) -> Result<Vec<String>> {
    let stdout = run(dir, &["ls-files", "-z"], timeout).await?;
    Ok(stdout
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(String::from)
        .collect())
}

/// Current branch name (`HEAD` when detached)
pub async fn branch(dir: &Path, timeout: Duration) -> Result<String> {
    let stdout = run(dir, &["rev-parse", "--abbrev-ref", "HEAD"], timeout).await?;
    Ok(stdout.trim().to_string())
}

/// Raw `git status --porcelain` output
pub async fn status_porcelain(dir: &Path, timeout: Duration) -> Result<String> {
    run(dir, &["status", "--porcelain"], timeout).await
}

/// Working tree counts derived from porcelain status lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitStatus {
    pub modified: usize,
    pub staged: usize,
    pub untracked: usize,
}

impl GitStatus {
    pub fn parse(porcelain: &str) -> Self {
        let mut status = Self::default();

        for line in porcelain.lines().filter(|l| !l.is_empty()) {
            let code = line.get(..2).unwrap_or(line);
            if matches!(code, " M" | "MM" | "AM") {
                status.modified += 1;
            }
            if matches!(line.chars().next(), Some('M' | 'A' | 'D' | 'R')) {
                status.staged += 1;
            }
            if code == "??" {
                status.untracked += 1;
            }
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_parse_porcelain() {
        let porcelain = " M src/lib.rs\nMM Cargo.toml\nAM new.rs\nA  added.rs\nD  gone.rs\nR  a.rs -> b.rs\n?? scratch.txt\n?? notes.md\n";
        let status = GitStatus::parse(porcelain);

        assert_eq!(status.modified, 3);
        assert_eq!(status.staged, 5);
        assert_eq!(status.untracked, 2);
        assert_ne!(status, GitStatus::default());
    }

    #[test]
    fn test_parse_empty_porcelain() {
        assert_eq!(GitStatus::parse(""), GitStatus::default());
        assert_eq!(GitStatus::parse("\n"), GitStatus::default());
    }

    #[tokio::test]
    async fn test_outside_repository_fails() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();

        let err = tracked_files(dir.path(), TIMEOUT).await.unwrap_err();
        assert!(matches!(err, GitError::Failed { .. }));
    }

    #[tokio::test]
    async fn test_tracked_files_and_status() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tracked.md"), "# title").unwrap();
        std::fs::write(dir.path().join("loose.py"), "print(1)").unwrap();

        run(dir.path(), &["init", "-q"], TIMEOUT).await.unwrap();
        run(dir.path(), &["add", "tracked.md"], TIMEOUT).await.unwrap();

        let files = tracked_files(dir.path(), TIMEOUT).await.unwrap();
        assert_eq!(files, vec!["tracked.md".to_string()]);

        let status = GitStatus::parse(&status_porcelain(dir.path(), TIMEOUT).await.unwrap());
        assert_eq!(status.staged, 1);
        assert_eq!(status.untracked, 1);
    }
}
