//! Virtual file system for SLATE_OS.
//!
//! The notify protocol and the notification log run over the `Vfs` trait so
//! the same code paths work against an in-memory tree in tests and a real
//! directory on the desktop. Paths are absolute, `/`-separated.

mod disk;
mod memory;

pub use disk::DiskVfs;
pub use memory::MemoryVfs;

use slate_types::error::Result;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry returned by `readdir`.
#[derive(Debug, Clone)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

/// Metadata for a single path.
#[derive(Debug, Clone, Copy)]
pub struct VfsMetadata {
    pub kind: EntryKind,
    pub size: u64,
}

/// File system operations used by the shell core.
pub trait Vfs {
    /// List the entries of a directory, sorted by name.
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>>;

    /// Read an entire file.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Create or replace a file; missing parent directories are created.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<()>;

    /// Metadata for a path.
    fn stat(&self, path: &str) -> Result<VfsMetadata>;

    /// Create a directory (and any missing parents).
    fn mkdir(&mut self, path: &str) -> Result<()>;

    /// Remove a file or empty directory.
    fn remove(&mut self, path: &str) -> Result<()>;

    /// Append to a file, creating it if absent.
    fn append(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let mut buf = self.read(path).unwrap_or_default();
        buf.extend_from_slice(data);
        self.write(path, &buf)
    }

    /// Whether the path exists at all.
    fn exists(&self, path: &str) -> bool {
        self.stat(path).is_ok()
    }

    /// Read a file as text. Invalid UTF-8 is replaced rather than rejected:
    /// a half-written notify line must degrade, not fail the frame loop.
    fn read_to_string(&self, path: &str) -> Result<String> {
        let bytes = self.read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
