//! Status-line renderers
//!
//! Both renderers read the host tool's workspace JSON on stdin and print a
//! single decorated line: directory, file/line estimate, token count from
//! `repo-tokens --simple`, package manager and git state. Every probe is
//! best-effort; a failing probe only drops its part of the line.

pub mod counter;
pub mod input;
pub mod layout;
pub mod project;

pub use input::StatusInput;
pub use layout::{StatusInfo, Variant};

/// Initialise stderr logging shared by both binaries
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// Read stdin, collect everything for `variant`, and print the two output lines
pub async fn run(variant: Variant) -> anyhow::Result<()> {
    let raw = std::io::read_to_string(std::io::stdin()).unwrap_or_default();
    let input = StatusInput::parse(&raw);

    let info = StatusInfo::collect(&input.project_dir(), variant).await;
    print!("{}", layout::frame(&info.render(variant)));

    Ok(())
}
