//! In-memory VFS implementation.
//!
//! The whole tree lives in a `BTreeMap` keyed by normalized absolute path,
//! which keeps `readdir` output sorted for free. Used by unit tests and as
//! the shell's scratch tree.

use std::collections::BTreeMap;

use slate_types::error::{Result, SlateError};

use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// A fully in-memory virtual file system.
#[derive(Debug)]
pub struct MemoryVfs {
    nodes: BTreeMap<String, Node>,
}

impl MemoryVfs {
    /// Create a new tree containing only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self { nodes }
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a path to `/a/b/c` form: leading slash, single separators,
/// no trailing slash except for the root itself.
fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for part in path.split('/').filter(|p| !p.is_empty()) {
        out.push('/');
        out.push_str(part);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Parent of a normalized path; the root is its own parent.
fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

impl MemoryVfs {
    fn ensure_dirs(&mut self, path: &str) {
        if path == "/" {
            return;
        }
        let par = parent(path).to_string();
        self.ensure_dirs(&par);
        self.nodes.entry(path.to_string()).or_insert(Node::Dir);
    }
}

impl Vfs for MemoryVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(SlateError::Vfs(format!("not a directory: {path}")));
            },
            None => return Err(SlateError::Vfs(format!("no such directory: {path}"))),
        }

        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };

        let mut entries = Vec::new();
        for (key, node) in self.nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            entries.push(VfsEntry {
                name: rest.to_string(),
                kind: match node {
                    Node::Dir => EntryKind::Directory,
                    Node::File(_) => EntryKind::File,
                },
                size: match node {
                    Node::File(data) => data.len() as u64,
                    Node::Dir => 0,
                },
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Dir) => Err(SlateError::Vfs(format!("is a directory: {path}"))),
            None => Err(SlateError::Vfs(format!("no such file: {path}"))),
        }
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path);
        if matches!(self.nodes.get(&path), Some(Node::Dir)) {
            return Err(SlateError::Vfs(format!("is a directory: {path}")));
        }
        let par = parent(&path).to_string();
        self.ensure_dirs(&par);
        self.nodes.insert(path, Node::File(data.to_vec()));
        Ok(())
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::File(data)) => Ok(VfsMetadata {
                kind: EntryKind::File,
                size: data.len() as u64,
            }),
            Some(Node::Dir) => Ok(VfsMetadata {
                kind: EntryKind::Directory,
                size: 0,
            }),
            None => Err(SlateError::Vfs(format!("no such path: {path}"))),
        }
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        if matches!(self.nodes.get(&path), Some(Node::File(_))) {
            return Err(SlateError::Vfs(format!("file exists: {path}")));
        }
        self.ensure_dirs(&path);
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        if path == "/" {
            return Err(SlateError::Vfs("cannot remove root".to_string()));
        }
        match self.nodes.get(&path) {
            Some(Node::Dir) => {
                let prefix = format!("{path}/");
                if self.nodes.keys().any(|k| k.starts_with(&prefix)) {
                    return Err(SlateError::Vfs(format!("directory not empty: {path}")));
                }
            },
            Some(Node::File(_)) => {},
            None => return Err(SlateError::Vfs(format!("no such path: {path}"))),
        }
        self.nodes.remove(&path);
        Ok(())
    }
}
