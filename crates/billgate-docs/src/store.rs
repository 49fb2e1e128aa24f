//! File-backed document storage.
//!
//! One file per bill under a root directory: `<root>/<billId>`. Content is
//! opaque and returned byte-for-byte. The store is read-only.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read-only document store rooted at a directory.
///
/// Cheaply cloneable via `Arc`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: Arc<PathBuf>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the document stored under `id`.
    ///
    /// Returns `Ok(None)` when no such document exists, including when
    /// `id` is not a plain file name (so `..` and separators can never
    /// reach outside the root).
    pub async fn read(&self, id: &str) -> io::Result<Option<Vec<u8>>> {
        if !is_plain_name(id) {
            return Ok(None);
        }
        match tokio::fs::read(self.root.join(id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn is_plain_name(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
}
