//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::GenerateConfig;

/// embedgen - Generate Rust source that embeds a directory of assets.
#[derive(Debug, Parser)]
#[command(name = "embedgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for assets (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Generated Rust file to write
    #[arg(long, value_name = "FILE")]
    pub dst: Option<PathBuf>,

    /// Asset type to generate: template or blob (default: template)
    #[arg(long = "type", value_name = "TYPE")]
    pub asset_type: Option<String>,

    /// Registry type imported by generated code (default: embedgen::Registry)
    #[arg(long, value_name = "PATH")]
    pub registry_path: Option<String>,

    /// Path to config file (default: embedgen.yml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List every embedded asset
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Settings given on the command line, for overlaying on a config file.
    pub fn overrides(&self) -> GenerateConfig {
        GenerateConfig {
            dir: self.dir.clone(),
            dst: self.dst.clone(),
            asset_type: self.asset_type.clone(),
            registry_path: self.registry_path.clone(),
        }
    }
}

/// One-line usage text.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}
