//! Asset storage modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How asset content is stored in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetMode {
    /// Parse content as a text template.
    #[default]
    Template,
    /// Store content verbatim as bytes.
    Blob,
}

impl FromStr for AssetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "blob" => Ok(Self::Blob),
            _ => Err(format!("unknown asset type: {}", s)),
        }
    }
}

impl fmt::Display for AssetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => f.write_str("template"),
            Self::Blob => f.write_str("blob"),
        }
    }
}
