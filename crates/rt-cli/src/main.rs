mod cli;
mod render;

use anyhow::Result;
use clap::Parser;
use rt_config::Config;
use rt_core::Error;
use rt_engine::Scanner;
use rt_sources::FileSelector;
use rt_storage::JsonFileStore;

use crate::cli::{Cli, OutputMode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the count for status lines
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if !cli.path.exists() {
        return Err(Error::PathNotFound(cli.path.display().to_string()).into());
    }

    let config = Config::load_or_default();
    let model = cli.model.clone().unwrap_or_else(|| config.model.clone());
    tracing::debug!("Counting {} with model {}", cli.path.display(), model);

    let mut scanner = build_scanner(&config, cli.no_cache);
    let result = scanner.scan(&cli.path, &model).await?;

    let output = match cli.output_mode() {
        OutputMode::Simple => render::simple(&result),
        OutputMode::StatusLine => render::status_line(&result),
        OutputMode::Pretty => {
            colored::control::set_override(render::supports_color());
            render::pretty(&render::target_name(&cli.path), &result)
        }
        OutputMode::Summary => render::summary(&render::target_name(&cli.path), &result),
    };
    println!("{}", output);

    Ok(())
}

fn build_scanner(config: &Config, no_cache: bool) -> Scanner {
    let selector = FileSelector::new(
        config.scan.extensions.clone(),
        config.scan.ignored_dirs.clone(),
        config.git_timeout(),
    );

    let scanner = if no_cache {
        Scanner::uncached(selector)
    } else {
        let store = JsonFileStore::new(config.cache_path())
            .with_ttl(config.cache_ttl())
            .with_max_entries(config.cache.max_entries);
        Scanner::new(selector, Box::new(store))
    };

    scanner.with_max_file_size(config.scan.max_file_size)
}
