//! Print a decoded configuration.

use super::common;
use clap::{Args, ValueEnum};
use route_config::DeserializeOptions;
use std::path::PathBuf;

/// Output encoding for `dump`.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DumpFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// TOML
    Toml,
}

/// Dump a configuration document.
#[derive(Args)]
pub struct DumpArgs {
    /// Path to the document (searched on the device partitions if omitted)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: DumpFormat,
}

/// Run the dump command.
pub fn run(args: DumpArgs) -> anyhow::Result<()> {
    let path = common::resolve_path(args.file)?;
    let config = common::load(&path, DeserializeOptions::default())?;

    let text = match args.format {
        DumpFormat::Json => serde_json::to_string_pretty(&config)?,
        DumpFormat::Toml => toml::to_string_pretty(&config)?,
    };
    println!("{text}");
    Ok(())
}
