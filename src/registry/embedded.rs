//! Registry population from directories embedded with [`include_dir`].
//!
//! An alternative to generated `init` code: embed the asset tree with
//! `include_dir!` and register every file at startup.

use crate::error::Result;
use crate::registry::mode::AssetMode;
use crate::registry::store::Registry;
use crate::walker;
use include_dir::{Dir, DirEntry, File};

impl Registry {
    /// Register every non-hidden file in `dir` (recursively) under its path
    /// within the embedded tree. Returns the number of assets registered.
    ///
    /// # Errors
    ///
    /// In template mode, returns `InvalidUtf8` or `ParseError` for the first
    /// file that cannot be registered. Files registered before it remain.
    pub fn register_dir(&mut self, dir: &Dir<'_>, mode: AssetMode) -> Result<usize> {
        let mut count = 0;
        for file in files(dir) {
            let name = walker::asset_name(file.path());
            self.insert(mode, &name, file.contents())?;
            count += 1;
        }
        tracing::debug!("Registered {} embedded {} assets", count, mode);
        Ok(count)
    }
}

fn files<'a>(dir: &'a Dir<'a>) -> Vec<&'a File<'a>> {
    let mut out = Vec::new();
    collect(dir.entries(), &mut out);
    out
}

fn collect<'a>(entries: &'a [DirEntry<'a>], out: &mut Vec<&'a File<'a>>) {
    for entry in entries {
        let hidden = entry
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false);
        if hidden {
            continue;
        }
        match entry {
            DirEntry::File(f) => out.push(f),
            DirEntry::Dir(d) => collect(d.entries(), out),
        }
    }
}
