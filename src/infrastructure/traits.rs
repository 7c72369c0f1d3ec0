//! Filesystem boundary.
//!
//! Services take the filesystem as `Arc<dyn FileSystem>` so tests can swap
//! in fakes without touching the disk.

use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations this system performs.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and any missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Resolve symlinks and relative segments into an absolute path.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Production implementation, a thin veneer over `std::fs`.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}
