//! Error types for SLATE_OS.

use std::io;

/// Errors produced by the SLATE_OS framework.
#[derive(Debug, thiserror::Error)]
pub enum SlateError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("notify protocol error: {0}")]
    Notify(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SlateError>;
