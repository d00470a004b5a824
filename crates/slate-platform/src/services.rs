//! Platform service traits and desktop implementations.

use std::process::{Command, Stdio};
use std::time::Instant;

use chrono::{Datelike, Local, Timelike};

use slate_types::error::{Result, SlateError};

// ---------------------------------------------------------------------------
// Time service
// ---------------------------------------------------------------------------

/// A simple wall-clock timestamp.
#[derive(Debug, Clone, Copy)]
pub struct SystemTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl std::fmt::Display for SystemTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second,
        )
    }
}

/// Abstraction over platform time services.
pub trait TimeService {
    /// Current wall-clock time.
    fn now(&self) -> Result<SystemTime>;

    /// Seconds since the process started.
    fn uptime_secs(&self) -> Result<u64>;
}

// ---------------------------------------------------------------------------
// Sound service
// ---------------------------------------------------------------------------

/// The fixed cues the shell plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Virtual-keyboard key accepted.
    KeyClick,
    /// Notification, dialogue, or message arrived.
    Notify,
}

/// Fire-and-forget audio. Implementations must never block the frame loop;
/// failures are swallowed (logged at most).
pub trait SoundService {
    fn play(&mut self, cue: SoundCue);
}

/// Silent sound service for tests and audio-less hosts.
#[derive(Debug, Default)]
pub struct NullSound;

impl SoundService for NullSound {
    fn play(&mut self, _cue: SoundCue) {}
}

// ---------------------------------------------------------------------------
// App launcher
// ---------------------------------------------------------------------------

/// Abstraction over launching an external app process. The shell only ever
/// fires a detached child and moves on; it never waits.
pub trait AppLauncher {
    /// Launch `command` (program plus whitespace-separated args).
    fn launch(&mut self, command: &str) -> Result<()>;
}

/// Desktop launcher spawning detached child processes.
#[derive(Debug, Default)]
pub struct DesktopLauncher;

impl AppLauncher for DesktopLauncher {
    fn launch(&mut self, command: &str) -> Result<()> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| SlateError::Platform("empty launch command".to_string()))?;
        Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SlateError::Platform(format!("failed to launch {program}: {e}")))?;
        log::info!("launched external app: {command}");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Desktop platform
// ---------------------------------------------------------------------------

/// Desktop implementation of the platform services.
#[derive(Debug)]
pub struct DesktopPlatform {
    started: Instant,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeService for DesktopPlatform {
    fn now(&self) -> Result<SystemTime> {
        let now = Local::now();
        Ok(SystemTime {
            year: now.year().clamp(0, u16::MAX as i32) as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        })
    }

    fn uptime_secs(&self) -> Result<u64> {
        Ok(self.started.elapsed().as_secs())
    }
}
