//! Generation config file loading.
//!
//! A project may keep its generation settings in `embedgen.yml` instead of
//! repeating them on every invocation:
//!
//! ```yaml
//! dir: assets
//! dst: src/assets/generated.rs
//! type: blob
//! registry_path: crate::assets::Registry
//! ```
//!
//! Command-line flags override every value from the file.

use crate::error::{EmbedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "embedgen.yml";

/// Settings for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Directory to scan.
    pub dir: Option<PathBuf>,

    /// Output file.
    pub dst: Option<PathBuf>,

    /// Asset type (`template` or `blob`); validated by the caller.
    #[serde(rename = "type")]
    pub asset_type: Option<String>,

    /// Path of the registry type imported by generated code.
    pub registry_path: Option<String>,
}

impl GenerateConfig {
    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: GenerateConfig) -> GenerateConfig {
        GenerateConfig {
            dir: other.dir.or(self.dir),
            dst: other.dst.or(self.dst),
            asset_type: other.asset_type.or(self.asset_type),
            registry_path: other.registry_path.or(self.registry_path),
        }
    }
}

/// Find `embedgen.yml` in `root`.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let path = root.join(DEFAULT_CONFIG_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<GenerateConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EmbedError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EmbedError::io_at(path, e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`GenerateConfig`].
///
/// Relative `dir` and `dst` values are resolved against the config file's
/// directory.
pub fn parse_config(content: &str, source_path: &Path) -> Result<GenerateConfig> {
    let mut config: GenerateConfig = if content.trim().is_empty() {
        GenerateConfig::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| EmbedError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    if let Some(base) = source_path.parent() {
        config.dir = config.dir.map(|p| base.join(p));
        config.dst = config.dst.map(|p| base.join(p));
    }
    Ok(config)
}
