use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repo-tokens")]
#[command(about = "Count tokens in a repository or a file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a directory (recursive) or a single file
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Simple output (just token count)
    #[arg(long)]
    pub simple: bool,

    /// Tokenizer selection (default from config: gpt-4o)
    #[arg(long)]
    pub model: Option<String>,

    /// Output formatted for a status line
    #[arg(long)]
    pub status_line: bool,

    /// Colorful human-readable summary
    #[arg(long)]
    pub pretty: bool,

    /// Skip reading and writing the result cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Which rendering a run prints; earlier flags win
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Simple,
    StatusLine,
    Pretty,
    Summary,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.simple {
            OutputMode::Simple
        } else if self.status_line {
            OutputMode::StatusLine
        } else if self.pretty {
            OutputMode::Pretty
        } else {
            OutputMode::Summary
        }
    }
}
