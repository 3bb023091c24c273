//! Whole-file text I/O behind a small trait

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// The file operations a stanza document depends on.
///
/// Reads and writes always cover the whole file. There is no locking and
/// no atomic replace: a failed write may leave a truncated file behind.
pub trait FileStore {
    /// Returns true if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the entire file as UTF-8 text.
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Replace the file contents with `content`, creating it if needed.
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;

    /// Create a zero-length file. An existing file is left untouched.
    fn create_empty(&self, path: &Path) -> Result<()>;
}

/// [`FileStore`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    Ok(())
}

impl FileStore for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        ensure_parent(path)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::io(path, e))?;

        file.write_all(content.as_bytes())
            .map_err(|e| Error::io(path, e))?;
        file.flush().map_err(|e| Error::io(path, e))?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(())
    }

    fn create_empty(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        options.open(path).map_err(|e| Error::io(path, e))?;

        tracing::debug!(path = %path.display(), "Created empty file");
        Ok(())
    }
}

/// In-memory [`FileStore`], handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with content.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    /// Current content of a file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Number of files held.
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl FileStore for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.get(path).ok_or_else(|| {
            Error::io(
                path,
                std::io::Error::new(ErrorKind::NotFound, "no such file in memory store"),
            )
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        self.insert(path, content);
        Ok(())
    }

    fn create_empty(&self, path: &Path) -> Result<()> {
        self.files
            .borrow_mut()
            .entry(path.to_path_buf())
            .or_default();
        Ok(())
    }
}

impl<T: FileStore + ?Sized> FileStore for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        (**self).read_text(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        (**self).write_text(path, content)
    }

    fn create_empty(&self, path: &Path) -> Result<()> {
        (**self).create_empty(path)
    }
}
