//! Command-line entry point that prints a resolved config hierarchy as JSON.

use anyhow::Context;
use cjson_config::{ConfigLoader, LoadOptions};
use clap::Parser;
use log::{debug, info};
use serde_json::Value;
use std::path::PathBuf;

/// Command-line options for the config printer.
#[derive(Parser, Debug)]
#[command(
    name = "config-cjson",
    version,
    about = "Returns config object from hierarchy of cjson config files."
)]
struct Cli {
    /// Root config file path
    config: PathBuf,
    /// Print only the public subset
    #[arg(long)]
    public: bool,
    /// Print the result on a single line
    #[arg(long)]
    compact: bool,
}

/// Entry point for the config printer.
fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting config-cjson (public={}, compact={})",
        cli.public, cli.compact
    );
    let options = LoadOptions::from_env().context("failed to resolve working directory")?;
    let loaded = ConfigLoader::new(options)
        .load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    debug!("resolved config from {} file(s)", loaded.files.len());

    let output = if cli.public {
        loaded.public
    } else {
        loaded.into_value()
    };
    println!("{}", render(&output, cli.compact)?);
    Ok(())
}

/// Serialize the config, pretty-printed with two-space indents unless compact.
fn render(value: &Value, compact: bool) -> anyhow::Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    rendered.context("failed to serialize config")
}
