//! Recursive directory listing.
//!
//! Hidden entries (names starting with `.`) are skipped together with their
//! whole subtree. Paths are returned joined onto the walked root, in the
//! order the filesystem reports directory entries.

use crate::error::{EmbedError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// List every non-hidden file below `root`.
///
/// A root of `.` yields bare relative paths (`a/b.txt`, not `./a/b.txt`).
///
/// # Errors
///
/// Returns `IoAt` for the first directory that cannot be opened or listed;
/// the rest of the walk is abandoned.
pub fn children(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(root, &mut files)?;
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| EmbedError::io_at(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| EmbedError::io_at(dir, e))?;
        let name = entry.file_name();
        if is_hidden(&name.to_string_lossy()) {
            continue;
        }

        let path = join(dir, Path::new(&name));
        let file_type = entry.file_type().map_err(|e| EmbedError::io_at(&path, e))?;
        if file_type.is_dir() {
            walk(&path, files)?;
        } else {
            files.push(path);
        }
    }

    Ok(())
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

pub(crate) fn join(dir: &Path, name: &Path) -> PathBuf {
    if dir == Path::new(".") {
        name.to_path_buf()
    } else {
        dir.join(name)
    }
}

/// Render a path as an asset name, always using `/` separators.
pub fn asset_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
