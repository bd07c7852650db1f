//! Error types for embedgen operations.
//!
//! This module defines [`EmbedError`], the error type returned by every
//! walker, registry, matcher, and emitter operation, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Every failure aborts the current operation and carries the offending
//!   asset name or path
//! - `EmbedError::Other` wraps unexpected `anyhow` errors from glue code

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for embedgen operations.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// A name-matching pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Template text could not be parsed.
    #[error("Failed to parse template '{name}': {message}")]
    ParseError { name: String, message: String },

    /// Merging would add a second sub-template under an existing name.
    #[error("Error adding '{name}' to composite template '{composite}': name already defined")]
    NameCollision { name: String, composite: String },

    /// Asset missing from both the registry and (if searched) the disk.
    #[error("Asset not found: {name}")]
    NotFound { name: String },

    /// Template mode requires UTF-8 file content.
    #[error("Template source is not valid UTF-8: {path}")]
    InvalidUtf8 { path: PathBuf },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the generation config file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Template rendering failed.
    #[error("Failed to render template '{name}': {message}")]
    Render { name: String, message: String },

    /// IO error tied to a specific path.
    #[error("IO error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmbedError {
    /// Attach a path to an IO error.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for embedgen operations.
pub type Result<T> = std::result::Result<T, EmbedError>;
