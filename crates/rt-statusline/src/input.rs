use serde::Deserialize;
use std::path::PathBuf;

/// Workspace JSON the host tool writes to stdin
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusInput {
    #[serde(default)]
    pub workspace: WorkspaceInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceInfo {
    #[serde(default)]
    pub current_dir: Option<String>,
    #[serde(default)]
    pub project_dir: Option<String>,
}

impl StatusInput {
    /// Anything that is not the expected object is treated as `{}`
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// `project_dir`, else `current_dir`, else `.`
    pub fn project_dir(&self) -> PathBuf {
        let current = self.workspace.current_dir.as_deref().unwrap_or(".");
        PathBuf::from(self.workspace.project_dir.as_deref().unwrap_or(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_dir_preferred() {
        let input = StatusInput::parse(
            r#"{"workspace": {"current_dir": "/repo/src", "project_dir": "/repo"}}"#,
        );
        assert_eq!(input.project_dir(), PathBuf::from("/repo"));
    }

    #[test]
    fn test_falls_back_to_current_dir() {
        let input =
            StatusInput::parse(r#"{"workspace": {"current_dir": "/repo/src"}, "model": {}}"#);
        assert_eq!(input.project_dir(), PathBuf::from("/repo/src"));
    }

    #[test]
    fn test_invalid_input_defaults() {
        assert_eq!(StatusInput::parse("").project_dir(), PathBuf::from("."));
        assert_eq!(StatusInput::parse("not json").project_dir(), PathBuf::from("."));
        assert_eq!(StatusInput::parse("[1, 2]").project_dir(), PathBuf::from("."));
        assert_eq!(StatusInput::parse(r#"{"workspace": 5}"#).project_dir(), PathBuf::from("."));
    }
}
