//! Output formats for a tokenization result

use std::io::IsTerminal;
use std::path::Path;

use colored::Colorize;
use rt_core::{TokenizationResult, format_tokens, group_thousands};

const RULE: &str = "───────────────────────────────────────────────────────";

/// Colors only for an interactive stdout with `NO_COLOR` unset
pub fn supports_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Last component of the absolute target path
pub fn target_name(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| absolute.display().to_string())
}

pub fn simple(result: &TokenizationResult) -> String {
    result.formatted.clone()
}

pub fn status_line(result: &TokenizationResult) -> String {
    format!("📊 {} tokens", result.formatted)
}

pub fn summary(target: &str, result: &TokenizationResult) -> String {
    [
        format!("Target: {}", target),
        format!("Files: {}", group_thousands(result.file_count)),
        format!(
            "Tokens: {} ({})",
            group_thousands(result.total_tokens),
            result.formatted
        ),
    ]
    .join("\n")
}

/// Boxed multi-line summary; callers decide coloring via `colored::control`
pub fn pretty(target: &str, result: &TokenizationResult) -> String {
    let bar = "│".cyan();
    let mut lines = vec![
        format!("┌{}┐", RULE).cyan().to_string(),
        format!(
            "{} {}                                      {}",
            bar,
            "Repo Tokens Summary".bold(),
            bar
        ),
        format!("├{}┤", RULE).cyan().to_string(),
        format!("{} 📁 {}", bar, target.bold()),
        format!(
            "{} 🧠 Model: {}  {}",
            bar,
            result.model.magenta(),
            format!("[{}]", result.encoder).blue()
        ),
        format!(
            "{} 🗂️  Files counted: {}  •  Skipped: {}",
            bar,
            group_thousands(result.file_count).green(),
            result.skipped.summary().yellow()
        ),
        format!(
            "{} 🔢 Tokens: {}  ({})  •  Avg/file: {}",
            bar,
            group_thousands(result.total_tokens).bold(),
            result.formatted.green(),
            group_thousands(result.average_per_file())
        ),
    ];

    let top = result.top_extensions(3);
    if !top.is_empty() {
        let listed: Vec<String> = top
            .iter()
            .map(|(ext, tokens)| format!("{}: {}", ext, format_tokens(*tokens)))
            .collect();
        lines.push(format!("{} 🔎 Top types: {}", bar, listed.join(", ")));
    }

    let cache = if result.cached { "hit" } else { "miss" };
    lines.push(format!("├{}┤", RULE).cyan().to_string());
    lines.push(format!("{} cache={}", bar, cache));
    lines.push(format!("└{}┘", RULE).cyan().to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::SkipCounts;
    use std::collections::BTreeMap;

    fn result() -> TokenizationResult {
        TokenizationResult {
            total_tokens: 12_345,
            file_count: 3,
            formatted: "12.3k".to_string(),
            skipped: SkipCounts {
                large: 1,
                empty: 0,
                error: 2,
            },
            ext_totals: BTreeMap::from([
                (".py".to_string(), 10_000),
                (".md".to_string(), 2_000),
                (".json".to_string(), 300),
                (".yml".to_string(), 45),
            ]),
            encoder: "o200k_base".to_string(),
            model: "gpt-4o".to_string(),
            cached: true,
        }
    }

    #[test]
    fn test_simple_and_status_line() {
        assert_eq!(simple(&result()), "12.3k");
        assert_eq!(status_line(&result()), "📊 12.3k tokens");
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary("my-repo", &result()),
            "Target: my-repo\nFiles: 3\nTokens: 12,345 (12.3k)"
        );
    }

    #[test]
    fn test_pretty_plain() {
        colored::control::set_override(false);
        let out = pretty("my-repo", &result());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with('┌'));
        assert_eq!(lines[3], "│ 📁 my-repo");
        assert_eq!(lines[4], "│ 🧠 Model: gpt-4o  [o200k_base]");
        assert_eq!(lines[5], "│ 🗂️  Files counted: 3  •  Skipped: 1 large, 2 error");
        assert_eq!(lines[6], "│ 🔢 Tokens: 12,345  (12.3k)  •  Avg/file: 4,115");
        assert_eq!(lines[7], "│ 🔎 Top types: .py: 10.0k, .md: 2.0k, .json: 300");
        assert_eq!(lines[9], "│ cache=hit");
        assert!(lines[10].starts_with('└'));
    }

    #[test]
    fn test_pretty_without_extensions() {
        colored::control::set_override(false);
        let empty = TokenizationResult {
            total_tokens: 0,
            file_count: 0,
            formatted: "0".to_string(),
            ext_totals: BTreeMap::new(),
            cached: false,
            ..result()
        };
        let out = pretty("empty", &empty);

        assert!(!out.contains("Top types"));
        assert!(out.contains("Avg/file: 0"));
        assert!(out.contains("cache=miss"));
    }

    #[test]
    fn test_target_name() {
        assert_eq!(target_name(Path::new("/home/user/project")), "project");
        assert_eq!(target_name(Path::new("/")), "/");
    }
}
