//! File system collaborator
//!
//! `:w` and `:e` go through this seam so the core never touches the disk
//! directly and tests can substitute an in-memory implementation.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Blocking file access used by the session
pub trait FileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String>;
    fn write_file(&mut self, path: &Path, text: &str) -> io::Result<()>;
}

/// The real disk
#[derive(Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_file(&mut self, path: &Path, text: &str) -> io::Result<()> {
        std::fs::write(path, text)
    }
}

/// In-memory file table for tests
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
    /// Paths whose reads and writes fail, to exercise error paths
    pub locked_paths: Vec<PathBuf>,
}

impl MemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<&String> {
        self.files.get(path)
    }
}

impl MemoryFileSystem {
    fn locked(&self, path: &Path) -> bool {
        self.locked_paths.iter().any(|p| p == path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        if self.locked(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_file(&mut self, path: &Path, text: &str) -> io::Result<()> {
        if self.locked(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}
