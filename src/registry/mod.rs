//! Asset registry for embedgen.
//!
//! This module holds the in-memory store that generated code populates and
//! application code queries:
//! - Exact lookup by name, optionally falling back to disk
//! - Pattern matching over names, optionally falling back to a disk walk
//! - Composite templates merged from every matching template
//!
//! # Disk Fallback
//!
//! Disk reads resolve names against the registry's disk root (the current
//! directory unless set with [`Registry::with_disk_root`]). Results read from
//! disk are returned to the caller and never stored.
//!
//! # Example
//!
//! ```
//! use embedgen::registry::Registry;
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.add_template("views/hello.hbs", "Hello {{name}}!").unwrap();
//!
//! let page = registry.matching_templates(false, "page", "^views/").unwrap();
//! let out = page.render("hello.hbs", &json!({ "name": "world" })).unwrap();
//! assert_eq!(out, "Hello world!");
//! ```

pub mod blob;
pub mod embedded;
pub mod matcher;
pub mod mode;
pub mod store;
pub mod template;

// Re-exports
pub use blob::BlobReader;
pub use matcher::compile;
pub use mode::AssetMode;
pub use store::{Registry, SharedRegistry};
pub use template::{CompositeTemplate, Template};
