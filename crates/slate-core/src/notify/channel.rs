//! The polled notify file.
//!
//! External writers drop one line into the file; the shell polls it on a
//! fixed frame interval, parses it, and truncates the file so each write is
//! delivered at most once. There is no locking: a partially written line
//! read mid-write is an accepted risk of the protocol.

use slate_vfs::Vfs;

use super::event::NotifyEvent;

/// Poll-driven reader of the notify file.
#[derive(Debug)]
pub struct NotifyChannel {
    path: String,
    poll_frames: u64,
    countdown: u64,
}

impl NotifyChannel {
    /// Channel over `path`, polling once every `poll_frames` frames
    /// (a value of 0 polls every frame).
    pub fn new(path: impl Into<String>, poll_frames: u64) -> Self {
        Self {
            path: path.into(),
            poll_frames,
            countdown: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Per-frame tick. Returns a parsed event when the interval elapsed and
    /// the file held a well-formed payload. Malformed payloads are logged
    /// and dropped; the file is truncated either way.
    pub fn tick(&mut self, vfs: &mut dyn Vfs) -> Option<NotifyEvent> {
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }
        self.countdown = self.poll_frames;
        self.poll_now(vfs)
    }

    /// Poll immediately, ignoring the interval.
    pub fn poll_now(&mut self, vfs: &mut dyn Vfs) -> Option<NotifyEvent> {
        // Missing file means nothing pending.
        let content = vfs.read_to_string(&self.path).ok()?;
        let pending = content.trim();
        if pending.is_empty() {
            return None;
        }

        // Consume before parse: at most one delivery per write, even when
        // the payload turns out to be malformed.
        if let Err(e) = vfs.write(&self.path, b"") {
            log::error!("failed to truncate notify file {}: {e}", self.path);
        }

        match NotifyEvent::parse(pending) {
            Ok(event) => Some(event),
            Err(e) => {
                log::warn!("dropping malformed notify payload: {e}");
                None
            },
        }
    }
}
