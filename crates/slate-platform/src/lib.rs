//! Platform service abstractions for SLATE_OS.
//!
//! The shell core never touches the wall clock, the audio device, or the
//! process table directly; everything goes through these traits so tests can
//! substitute deterministic implementations.

mod services;

pub use services::{
    AppLauncher, DesktopLauncher, DesktopPlatform, NullSound, SoundCue, SoundService, SystemTime,
    TimeService,
};
