//! The in-memory asset store.
//!
//! A [`Registry`] maps asset names to parsed templates and raw blobs. It is
//! populated by generated `init` code (see [`crate::emitter`]), by
//! [`Registry::register_dir`], or by direct calls. Lookups may fall back to
//! reading from disk, but disk reads are never cached into the store.

use crate::error::{EmbedError, Result};
use crate::registry::blob::BlobReader;
use crate::registry::mode::AssetMode;
use crate::registry::template::Template;
use crate::walker;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A registry shared between threads behind a single lock.
pub type SharedRegistry = Arc<Mutex<Registry>>;

/// Name-indexed store of templates and blobs.
#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) templates: HashMap<String, Arc<Template>>,
    pub(crate) blobs: HashMap<String, Arc<[u8]>>,
    pub(crate) disk_root: PathBuf,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry whose disk fallback reads from the current directory.
    pub fn new() -> Self {
        Self::with_disk_root(".")
    }

    /// Create an empty registry whose disk fallback reads below `root`.
    pub fn with_disk_root(root: impl Into<PathBuf>) -> Self {
        Self {
            templates: HashMap::new(),
            blobs: HashMap::new(),
            disk_root: root.into(),
        }
    }

    /// Wrap this registry for use from several threads.
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Directory that disk fallback resolves names against.
    pub fn disk_root(&self) -> &Path {
        &self.disk_root
    }

    /// Parse `text` and store it as a template under `name`, replacing any
    /// previous template of that name.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the template syntax is invalid; the registry is
    /// left unchanged.
    pub fn add_template(&mut self, name: &str, text: &str) -> Result<()> {
        let template = Template::parse(name, text)?;
        tracing::trace!("Registered template {}", name);
        self.templates.insert(name.to_string(), Arc::new(template));
        Ok(())
    }

    /// Store `bytes` verbatim under `name`, replacing any previous blob.
    pub fn add_blob(&mut self, name: &str, bytes: impl AsRef<[u8]>) {
        tracing::trace!("Registered blob {}", name);
        self.blobs
            .insert(name.to_string(), Arc::from(bytes.as_ref()));
    }

    /// Insert raw content according to `mode`.
    pub fn insert(&mut self, mode: AssetMode, name: &str, content: &[u8]) -> Result<()> {
        match mode {
            AssetMode::Blob => {
                self.add_blob(name, content);
                Ok(())
            }
            AssetMode::Template => {
                let text = std::str::from_utf8(content).map_err(|_| EmbedError::InvalidUtf8 {
                    path: PathBuf::from(name),
                })?;
                self.add_template(name, text)
            }
        }
    }

    /// Look up the template called `name`.
    ///
    /// With `disk_search`, a miss falls back to parsing the file `name`
    /// below the disk root.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if neither source has it, `ParseError` if the disk
    /// file is not a valid template.
    pub fn template(&self, name: &str, disk_search: bool) -> Result<Arc<Template>> {
        if let Some(template) = self.templates.get(name) {
            return Ok(Arc::clone(template));
        }
        if !disk_search {
            return Err(not_found(name));
        }

        let path = self.disk_path(name);
        tracing::debug!("Template {} not registered, reading {}", name, path.display());
        let text = read_text(&path, name)?;
        Ok(Arc::new(Template::parse(name, text)?))
    }

    /// Open a reader over the blob called `name`.
    ///
    /// With `disk_search`, a miss falls back to opening the file `name` below
    /// the disk root.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if neither source has it.
    pub fn blob(&self, name: &str, disk_search: bool) -> Result<BlobReader> {
        if let Some(bytes) = self.blobs.get(name) {
            return Ok(BlobReader::memory(Arc::clone(bytes)));
        }
        if !disk_search {
            return Err(not_found(name));
        }

        let path = self.disk_path(name);
        tracing::debug!("Blob {} not registered, opening {}", name, path.display());
        let file = fs::File::open(&path).map_err(|e| disk_error(e, &path, name))?;
        Ok(BlobReader::File(file))
    }

    /// Whether a template is registered under `name`.
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Whether a blob is registered under `name`.
    pub fn has_blob(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }

    /// All registered template names, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        sorted_keys(self.templates.keys())
    }

    /// All registered blob names, sorted.
    pub fn blob_names(&self) -> Vec<&str> {
        sorted_keys(self.blobs.keys())
    }

    /// Total number of registered assets.
    pub fn len(&self) -> usize {
        self.templates.len() + self.blobs.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn disk_path(&self, name: &str) -> PathBuf {
        walker::join(&self.disk_root, Path::new(name))
    }

    /// Disk names below the root, relative to it.
    pub(crate) fn disk_names(&self) -> Result<Vec<(String, PathBuf)>> {
        let files = walker::children(&self.disk_root)?;
        Ok(files
            .into_iter()
            .map(|path| {
                let relative = path.strip_prefix(&self.disk_root).unwrap_or(&path);
                (walker::asset_name(relative), path.clone())
            })
            .collect())
    }
}

fn sorted_keys<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut names: Vec<&str> = keys.map(|s| s.as_str()).collect();
    names.sort_unstable();
    names
}

fn not_found(name: &str) -> EmbedError {
    EmbedError::NotFound {
        name: name.to_string(),
    }
}

pub(crate) fn disk_error(err: io::Error, path: &Path, name: &str) -> EmbedError {
    match err.kind() {
        io::ErrorKind::NotFound => not_found(name),
        io::ErrorKind::InvalidData => EmbedError::InvalidUtf8 {
            path: path.to_path_buf(),
        },
        _ => EmbedError::io_at(path, err),
    }
}

pub(crate) fn read_text(path: &Path, name: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| disk_error(e, path, name))
}
