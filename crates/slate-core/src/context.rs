//! Explicit service context threaded through the shell subsystems.
//!
//! Replaces the hidden module-level state of a typical toy shell: every
//! collaborator (file tree, clock, sound, launcher) is passed in, so the
//! frame loop is testable in isolation.

use slate_platform::{AppLauncher, SoundCue, SoundService, TimeService};
use slate_vfs::Vfs;

/// Borrowed bundle of the platform services a subsystem may touch.
pub struct Services<'a> {
    pub vfs: &'a mut dyn Vfs,
    pub time: &'a dyn TimeService,
    pub sound: &'a mut dyn SoundService,
    pub launcher: &'a mut dyn AppLauncher,
}

impl Services<'_> {
    /// Current timestamp formatted for log lines, or a placeholder when the
    /// clock is unavailable (a missing clock must not break notifications).
    pub fn timestamp(&self) -> String {
        match self.time.now() {
            Ok(t) => t.to_string(),
            Err(_) => "????-??-?? ??:??:??".to_string(),
        }
    }

    /// Fire a sound cue without blocking.
    pub fn cue(&mut self, cue: SoundCue) {
        self.sound.play(cue);
    }
}

#[cfg(test)]
pub mod testing {
    //! Deterministic service doubles for unit tests.

    use slate_platform::{AppLauncher, SoundCue, SoundService, SystemTime, TimeService};
    use slate_types::error::Result;
    use slate_vfs::MemoryVfs;

    use super::Services;

    /// A clock pinned to one instant.
    pub struct FixedTime;

    impl TimeService for FixedTime {
        fn now(&self) -> Result<SystemTime> {
            Ok(SystemTime {
                year: 2026,
                month: 1,
                day: 2,
                hour: 3,
                minute: 4,
                second: 5,
            })
        }

        fn uptime_secs(&self) -> Result<u64> {
            Ok(0)
        }
    }

    /// Records every cue played.
    #[derive(Default)]
    pub struct RecordingSound {
        pub cues: Vec<SoundCue>,
    }

    impl SoundService for RecordingSound {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }
    }

    /// Records launch attempts; optionally fails them all.
    #[derive(Default)]
    pub struct RecordingLauncher {
        pub launched: Vec<String>,
        pub fail: bool,
    }

    impl AppLauncher for RecordingLauncher {
        fn launch(&mut self, command: &str) -> Result<()> {
            self.launched.push(command.to_string());
            if self.fail {
                Err(slate_types::error::SlateError::Platform(
                    "simulated launch failure".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }

    /// Owns one of every double and lends out a `Services`.
    pub struct TestServices {
        pub vfs: MemoryVfs,
        pub time: FixedTime,
        pub sound: RecordingSound,
        pub launcher: RecordingLauncher,
    }

    impl TestServices {
        pub fn new() -> Self {
            Self {
                vfs: MemoryVfs::new(),
                time: FixedTime,
                sound: RecordingSound::default(),
                launcher: RecordingLauncher::default(),
            }
        }

        pub fn services(&mut self) -> Services<'_> {
            Services {
                vfs: &mut self.vfs,
                time: &self.time,
                sound: &mut self.sound,
                launcher: &mut self.launcher,
            }
        }
    }
}
