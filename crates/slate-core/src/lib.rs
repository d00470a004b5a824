//! SLATE_OS core.
//!
//! Platform-agnostic shell subsystems: the notification manager (toasts,
//! dialogues, messages, the polled notify-file protocol, and the persistent
//! log), the pull-down notification center, the on-screen keyboard, and the
//! top bar. Every subsystem is a plain state struct: input events go in,
//! `update()` advances timers once per frame, and `update_sdi()` projects
//! the state into the scene graph.

// Re-exports from the foundation crates.
pub use slate_types::backend;
pub use slate_types::color;
pub use slate_types::config;
pub use slate_types::error;
pub use slate_types::geom;
pub use slate_types::input;

pub use slate_platform as platform;
pub use slate_sdi as sdi;
pub use slate_vfs as vfs;

pub mod center;
pub mod context;
pub mod notify;
pub mod osk;
pub mod text;
pub mod theme;
pub mod topbar;
