//! Append-only notification history file.
//!
//! Every accepted toast becomes one `[<timestamp>] <text>` line. The file
//! keeps a `===` header and is trimmed back to the most recent lines once it
//! grows past a byte cap. All reads degrade to "no history" on error.

use slate_vfs::Vfs;

use slate_types::error::Result;

/// Leading header line of a fresh log.
pub const LOG_HEADER: &str = "=== Notification Log ===";

/// Marker written when the history is cleared.
pub const CLEARED_MARKER: &str = "Notification Log Cleared";

/// Handle on the persistent notification log.
#[derive(Debug, Clone)]
pub struct NotifyLog {
    path: String,
    max_bytes: u64,
    max_lines: usize,
}

impl NotifyLog {
    /// Log at `path` with the default 1 MiB / 200-line trim policy.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            max_bytes: 1024 * 1024,
            max_lines: 200,
        }
    }

    /// Override the trim thresholds.
    pub fn with_limits(mut self, max_bytes: u64, max_lines: usize) -> Self {
        self.max_bytes = max_bytes;
        self.max_lines = max_lines;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create the file with its header if it does not exist yet.
    pub fn ensure(&self, vfs: &mut dyn Vfs) -> Result<()> {
        if !vfs.exists(&self.path) {
            vfs.write(&self.path, format!("{LOG_HEADER}\n").as_bytes())?;
        }
        Ok(())
    }

    /// Append one timestamped entry, trimming afterwards if oversized.
    pub fn append(&self, vfs: &mut dyn Vfs, timestamp: &str, text: &str) -> Result<()> {
        self.ensure(vfs)?;
        vfs.append(&self.path, format!("[{timestamp}] {text}\n").as_bytes())?;
        if let Ok(meta) = vfs.stat(&self.path) {
            if meta.size > self.max_bytes {
                log::warn!("notification log over {} bytes, trimming", self.max_bytes);
                self.trim(vfs)?;
            }
        }
        Ok(())
    }

    /// Keep the header plus the most recent `max_lines` lines.
    fn trim(&self, vfs: &mut dyn Vfs) -> Result<()> {
        let content = vfs.read_to_string(&self.path)?;
        let lines: Vec<&str> = content.lines().collect();
        let header: Vec<&str> = match lines.first() {
            Some(first) if first.starts_with("===") => vec![*first],
            _ => Vec::new(),
        };
        let body_start = lines.len().saturating_sub(self.max_lines);
        let mut kept: Vec<&str> = header;
        kept.extend(&lines[body_start..]);
        let mut out = kept.join("\n");
        out.push('\n');
        vfs.write(&self.path, out.as_bytes())
    }

    /// Replace the log with a header and a timestamped cleared marker.
    pub fn clear(&self, vfs: &mut dyn Vfs, timestamp: &str) -> Result<()> {
        let content = format!("{LOG_HEADER}\n[{timestamp}] {CLEARED_MARKER}\n");
        vfs.write(&self.path, content.as_bytes())
    }

    /// All non-empty lines, oldest first. Missing file reads as no history.
    pub fn lines(&self, vfs: &dyn Vfs) -> Vec<String> {
        match vfs.read_to_string(&self.path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
