//! End-to-end notify protocol flow: notify file -> channel -> manager -> log.

use slate_core::context::Services;
use slate_core::notify::{
    FadeState, NotificationManager, NotifyChannel, NotifyConfig, NotifyLog, OverlayAnswer,
};
use slate_platform::{AppLauncher, SoundCue, SoundService, SystemTime, TimeService};
use slate_types::error::Result;
use slate_vfs::{MemoryVfs, Vfs};

const NOTIFY_PATH: &str = "/config/notify.txt";
const LOG_PATH: &str = "/config/notifications_log.txt";

struct FixedTime;

impl TimeService for FixedTime {
    fn now(&self) -> Result<SystemTime> {
        Ok(SystemTime {
            year: 2026,
            month: 8,
            day: 6,
            hour: 12,
            minute: 0,
            second: 0,
        })
    }

    fn uptime_secs(&self) -> Result<u64> {
        Ok(0)
    }
}

#[derive(Default)]
struct CountingSound {
    played: usize,
}

impl SoundService for CountingSound {
    fn play(&mut self, _cue: SoundCue) {
        self.played += 1;
    }
}

#[derive(Default)]
struct CountingLauncher {
    launched: Vec<String>,
}

impl AppLauncher for CountingLauncher {
    fn launch(&mut self, command: &str) -> Result<()> {
        self.launched.push(command.to_string());
        Ok(())
    }
}

struct Harness {
    vfs: MemoryVfs,
    time: FixedTime,
    sound: CountingSound,
    launcher: CountingLauncher,
    channel: NotifyChannel,
    manager: NotificationManager,
}

impl Harness {
    fn new() -> Self {
        Self {
            vfs: MemoryVfs::new(),
            time: FixedTime,
            sound: CountingSound::default(),
            launcher: CountingLauncher::default(),
            channel: NotifyChannel::new(NOTIFY_PATH, 0),
            manager: NotificationManager::new(NotifyConfig::default(), NotifyLog::new(LOG_PATH)),
        }
    }

    /// Write one external payload into the notify file.
    fn inject(&mut self, line: &str) {
        self.vfs.write(NOTIFY_PATH, line.as_bytes()).unwrap();
    }

    /// One frame: poll the channel, feed the manager, advance timers.
    fn frame(&mut self) {
        let event = self.channel.tick(&mut self.vfs);
        if let Some(event) = event {
            let mut svc = Services {
                vfs: &mut self.vfs,
                time: &self.time,
                sound: &mut self.sound,
                launcher: &mut self.launcher,
            };
            self.manager.push_event(event, &mut svc);
        }
        self.manager.update();
    }

    fn resolve(&mut self, answer: OverlayAnswer) {
        let mut svc = Services {
            vfs: &mut self.vfs,
            time: &self.time,
            sound: &mut self.sound,
            launcher: &mut self.launcher,
        };
        self.manager.resolve(answer, &mut svc);
    }
}

#[test]
fn plain_line_becomes_logged_fading_toast() {
    let mut h = Harness::new();
    h.inject("hello world");
    h.frame();

    let toast = h.manager.toasts().front().expect("toast created");
    assert_eq!(toast.text, "hello world");
    // One update has run, so the fade has begun from alpha zero.
    assert_eq!(toast.fade, FadeState::FadeIn);
    assert!(toast.alpha <= h.manager.config().fade_step);

    let lines = NotifyLog::new(LOG_PATH).lines(&h.vfs);
    assert!(lines.iter().any(|l| l.contains("hello world")));
    assert!(lines.iter().any(|l| l.contains("[2026-08-06 12:00:00]")));

    // The notify file was consumed.
    assert_eq!(h.vfs.read(NOTIFY_PATH).unwrap(), b"");
}

#[test]
fn message_line_activates_okay_modal() {
    let mut h = Harness::new();
    h.inject(r#"message="Low battery""#);
    h.frame();

    assert_eq!(h.manager.active_message().unwrap().text, "Low battery");
    assert_eq!(h.manager.buttons().len(), 1);
    assert_eq!(h.manager.buttons()[0].label, "Okay");

    h.resolve(OverlayAnswer::Okay);
    assert!(h.manager.active_message().is_none());
    assert!(h.manager.buttons().is_empty());
}

#[test]
fn dialogue_yes_launches_once_then_clears() {
    let mut h = Harness::new();
    h.inject(r#"dialogue="Proceed?" if=yesrun"launch.sh""#);
    h.frame();

    assert_eq!(h.manager.active_dialogue().unwrap().text, "Proceed?");
    h.resolve(OverlayAnswer::Yes);
    assert_eq!(h.launcher.launched, vec!["launch.sh".to_string()]);
    assert!(h.manager.active_dialogue().is_none());
}

#[test]
fn dialogue_no_never_launches() {
    let mut h = Harness::new();
    h.inject(r#"dialogue="Proceed?" if=yesrun"launch.sh""#);
    h.frame();
    h.resolve(OverlayAnswer::No);
    assert!(h.launcher.launched.is_empty());
    assert!(h.manager.active_dialogue().is_none());
}

#[test]
fn queued_dialogues_deliver_in_order() {
    let mut h = Harness::new();
    h.inject(r#"dialogue="First?""#);
    h.frame();
    h.inject(r#"dialogue="Second?""#);
    h.frame();

    assert_eq!(h.manager.active_dialogue().unwrap().text, "First?");
    h.resolve(OverlayAnswer::No);
    assert_eq!(h.manager.active_dialogue().unwrap().text, "Second?");
}

#[test]
fn round_trip_n_toasts_to_n_log_lines() {
    let mut h = Harness::new();
    for i in 0..7 {
        h.inject(&format!("note {i}"));
        h.frame();
    }
    let lines = NotifyLog::new(LOG_PATH).lines(&h.vfs);
    // Header plus one line per toast.
    assert_eq!(lines.len(), 8);
    for i in 0..7 {
        assert!(lines[i + 1].contains(&format!("note {i}")));
    }
}

#[test]
fn toast_completes_full_fade_lifecycle() {
    let mut h = Harness::new();
    h.inject("ephemeral");
    h.frame();
    // Run well past fade-in + visibility + fade-out.
    for _ in 0..1000 {
        h.frame();
    }
    assert!(h.manager.toasts().is_empty());
}

#[test]
fn malformed_payload_degrades_to_noop() {
    let mut h = Harness::new();
    h.inject(r#"dialogue="no terminator"#);
    h.frame();
    assert!(h.manager.active_dialogue().is_none());
    assert!(h.manager.toasts().is_empty());
    // Consumed anyway: no replay on the next poll.
    h.frame();
    assert!(h.manager.toasts().is_empty());
}
