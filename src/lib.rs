//! embedgen - Embed template and blob assets into Rust source.
//!
//! embedgen scans a directory tree, and writes a Rust source file whose
//! `init` function registers every file with a [`Registry`] at startup, so
//! the asset files need not ship alongside the binary. At run time the
//! registry answers exact and pattern-based lookups, falling back to disk
//! when asked to.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `embedgen.yml` loading
//! - [`emitter`] - Rust source generation
//! - [`error`] - Error types and result aliases
//! - [`registry`] - In-memory asset store, matching, and composite templates
//! - [`ui`] - Terminal output
//! - [`walker`] - Recursive directory listing that skips hidden entries
//!
//! # Example
//!
//! ```
//! use embedgen::Registry;
//! use serde_json::json;
//!
//! // What a generated `init` function does:
//! let mut registry = Registry::new();
//! registry.add_template("assets/hello.hbs", "Hello {{name}}!").unwrap();
//!
//! let template = registry.template("assets/hello.hbs", false).unwrap();
//! assert_eq!(template.render(&json!({ "name": "Ada" })).unwrap(), "Hello Ada!");
//! ```

pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod registry;
pub mod ui;
pub mod walker;

pub use emitter::Emitter;
pub use error::{EmbedError, Result};
pub use registry::{AssetMode, Registry};
