//! Shell configuration.
//!
//! A plain struct with sensible defaults. The shell can overlay values from
//! a TOML string; there is no config-file discovery machinery.

use serde::Deserialize;

use crate::error::Result;

/// Top-level configuration for the shell.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Window / screen width in pixels.
    pub screen_width: u32,
    /// Window / screen height in pixels.
    pub screen_height: u32,
    /// Desktop window title.
    pub window_title: String,
    /// Target frame rate of the cooperative loop.
    pub tick_rate: u32,
    /// VFS path of the polled notify file.
    pub notify_path: String,
    /// VFS path of the append-only notification log.
    pub log_path: String,
    /// How often the notify file is polled, in frames.
    pub notify_poll_frames: u64,
    /// Clear the notification log on boot, leaving a timestamped marker.
    pub clear_log_on_boot: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            screen_width: 360,
            screen_height: 640,
            window_title: "SLATE_OS".to_string(),
            tick_rate: 60,
            notify_path: "/config/notify.txt".to_string(),
            log_path: "/config/notifications_log.txt".to_string(),
            notify_poll_frames: 30,
            clear_log_on_boot: true,
        }
    }
}

impl ShellConfig {
    /// Parse a config from a TOML string; absent keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
