//! On-disk VFS implementation rooted at a host directory.
//!
//! VFS paths map below the root; `..` components are rejected so the shell
//! cannot escape its data directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use slate_types::error::{Result, SlateError};

use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

/// A VFS backed by a directory on the host file system.
#[derive(Debug)]
pub struct DiskVfs {
    root: PathBuf,
}

impl DiskVfs {
    /// Open a disk VFS rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Resolve a VFS path to a host path.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut out = self.root.clone();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            if part == ".." {
                return Err(SlateError::Vfs(format!("path escapes root: {path}")));
            }
            out.push(part);
        }
        Ok(out)
    }
}

impl Vfs for DiskVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let host = self.resolve(path)?;
        let mut entries = Vec::new();
        for entry in fs::read_dir(&host)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            entries.push(VfsEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: if meta.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                size: if meta.is_dir() { 0 } else { meta.len() },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let host = self.resolve(path)?;
        Ok(fs::read(host)?)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let host = self.resolve(path)?;
        if let Some(parent) = host.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(fs::write(host, data)?)
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        let host = self.resolve(path)?;
        let meta = fs::metadata(host)?;
        Ok(VfsMetadata {
            kind: if meta.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            size: if meta.is_dir() { 0 } else { meta.len() },
        })
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let host = self.resolve(path)?;
        Ok(fs::create_dir_all(host)?)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let host = self.resolve(path)?;
        let meta = fs::metadata(&host)?;
        if meta.is_dir() {
            Ok(fs::remove_dir(host)?)
        } else {
            Ok(fs::remove_file(host)?)
        }
    }

    fn append(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let host = self.resolve(path)?;
        if let Some(parent) = host.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(host)?;
        file.write_all(data)?;
        Ok(())
    }
}
