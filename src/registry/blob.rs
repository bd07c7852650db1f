//! Readers over blob content.

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

/// A reader over a blob, backed either by registry memory or an open file.
#[derive(Debug)]
pub enum BlobReader {
    /// Content held in the registry.
    Memory(Cursor<Arc<[u8]>>),
    /// Content read straight from disk.
    File(File),
}

impl BlobReader {
    pub(crate) fn memory(bytes: Arc<[u8]>) -> Self {
        Self::Memory(Cursor::new(bytes))
    }

    /// Whether the content came from the registry rather than disk.
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

impl Read for BlobReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Memory(cursor) => cursor.read(buf),
            Self::File(file) => file.read(buf),
        }
    }
}
