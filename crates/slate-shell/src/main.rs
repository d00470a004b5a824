//! SLATE_OS desktop entry point.
//!
//! Portrait phone-shell simulation: home tile grid, slide-down top bar,
//! pull-down notification center, toast/dialogue/message overlays fed by the
//! polled notify file, and a blocking on-screen keyboard session.
//! Drag down from the top edge for the notification center (a short drag
//! toggles the top bar). Escape quits.

mod app_state;
mod home;
mod input;

use anyhow::Result;

use app_state::ShellState;
use home::HomeScreen;
use slate_backend_sdl::{SdlBackend, SdlSound};
use slate_core::backend::{InputBackend, SdiBackend};
use slate_core::center::{CenterConfig, NotificationCenter};
use slate_core::color::Color;
use slate_core::config::ShellConfig;
use slate_core::context::Services;
use slate_core::input::InputEvent;
use slate_core::notify::{NotificationManager, NotifyChannel, NotifyConfig, NotifyLog};
use slate_core::osk::{OskConfig, OskOutcome, OskState};
use slate_core::platform::{
    DesktopLauncher, DesktopPlatform, NullSound, SoundService, TimeService,
};
use slate_core::sdi::SdiRegistry;
use slate_core::topbar::{TopBar, TopBarConfig};
use slate_core::vfs::DiskVfs;

const BG_COLOR: Color = Color::rgb(16, 16, 24);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ShellConfig::default();
    log::info!(
        "Starting SLATE_OS ({}x{})",
        config.screen_width,
        config.screen_height,
    );

    let mut backend = SdlBackend::new(
        &config.window_title,
        config.screen_width,
        config.screen_height,
    )?;
    backend.init(config.screen_width, config.screen_height)?;

    // Sound cues are best effort; an audio-less host just runs silent.
    let mut sound: Box<dyn SoundService> = match SdlSound::new() {
        Ok(snd) => Box::new(snd),
        Err(e) => {
            log::warn!("audio unavailable, cues disabled: {e}");
            Box::new(NullSound)
        },
    };

    // The notify protocol and log live under a real directory so external
    // writers can reach them.
    let data_root = std::env::var("SLATE_DATA").unwrap_or_else(|_| "data".to_string());
    let mut vfs = DiskVfs::new(&data_root)?;
    log::info!("data directory: {data_root}");

    let platform = DesktopPlatform::new();
    let mut launcher = DesktopLauncher;

    let notify_log = NotifyLog::new(config.log_path.as_str());
    if config.clear_log_on_boot {
        let ts = platform.now().map(|t| t.to_string()).unwrap_or_default();
        if let Err(e) = notify_log.clear(&mut vfs, &ts) {
            log::warn!("failed to clear notification log: {e}");
        }
    } else if let Err(e) = notify_log.ensure(&mut vfs) {
        log::warn!("failed to create notification log: {e}");
    }

    let mut state = ShellState {
        manager: NotificationManager::new(
            NotifyConfig::for_screen(config.screen_width, config.screen_height),
            NotifyLog::new(config.log_path.as_str()),
        ),
        center: NotificationCenter::new(
            CenterConfig::for_screen(config.screen_width, config.screen_height),
            NotifyLog::new(config.log_path.as_str()),
        ),
        topbar: TopBar::new(TopBarConfig::for_screen(config.screen_width), "Home"),
        channel: NotifyChannel::new(config.notify_path.as_str(), config.notify_poll_frames),
        home: HomeScreen::new(config.screen_width, config.screen_height),
        drag_start: None,
        frame_counter: 0,
        config,
    };

    let mut sdi = SdiRegistry::new();

    {
        let duration = state.manager.config().default_duration_frames;
        let mut svc = Services {
            vfs: &mut vfs,
            time: &platform,
            sound: sound.as_mut(),
            launcher: &mut launcher,
        };
        state.manager.push_toast("Welcome to SLATE_OS", duration, &mut svc);
    }

    'running: loop {
        state.frame_counter += 1;

        let events = backend.poll_events();
        for event in &events {
            let result = input::handle_event(
                event,
                &mut state,
                &mut vfs,
                &platform,
                sound.as_mut(),
                &mut launcher,
            );
            match result {
                input::InputResult::Quit => break 'running,
                input::InputResult::OpenKeyboard => {
                    let typed = run_keyboard(
                        &mut backend,
                        &mut sdi,
                        sound.as_mut(),
                        &state.config,
                    )?;
                    match typed {
                        Some(text) if !text.is_empty() => {
                            let duration = state.manager.config().default_duration_frames;
                            let mut svc = Services {
                                vfs: &mut vfs,
                                time: &platform,
                                sound: sound.as_mut(),
                                launcher: &mut launcher,
                            };
                            state
                                .manager
                                .push_toast(&format!("Typed: {text}"), duration, &mut svc);
                        },
                        Some(_) => {},
                        // Quit arrived inside the modal.
                        None => break 'running,
                    }
                },
                input::InputResult::Continue => {},
            }
        }

        // Poll the notify file on its configured interval.
        if let Some(event) = state.channel.tick(&mut vfs) {
            let mut svc = Services {
                vfs: &mut vfs,
                time: &platform,
                sound: sound.as_mut(),
                launcher: &mut launcher,
            };
            state.manager.push_event(event, &mut svc);
        }

        // Timers first, then the scene graph, then the draw.
        state.manager.update();
        state.topbar.update();

        state.home.update_sdi(&mut sdi);
        state.topbar.update_sdi(&mut sdi);
        state.manager.update_sdi(&mut sdi);
        state.center.update_sdi(&mut sdi);

        backend.clear(BG_COLOR)?;
        sdi.draw(&mut backend)?;
        backend.swap_buffers()?;
    }

    backend.shutdown()?;
    log::info!("SLATE_OS shut down cleanly");
    Ok(())
}

/// Blocking keyboard session: owns the event queue until ENTER submits or
/// the process asks to quit. Returns `None` on quit.
fn run_keyboard(
    backend: &mut SdlBackend,
    sdi: &mut SdiRegistry,
    sound: &mut dyn SoundService,
    config: &ShellConfig,
) -> Result<Option<String>> {
    log::info!("keyboard session opened");
    let mut osk = OskState::new(OskConfig::for_screen(
        config.screen_width,
        config.screen_height,
    ));

    loop {
        for event in backend.poll_events() {
            match osk.handle_event(&event, sound) {
                OskOutcome::Submitted => {
                    // One more sync with the session inactive hides the scene.
                    osk.update_sdi(sdi);
                    log::info!("keyboard session submitted");
                    return Ok(osk.take_result());
                },
                OskOutcome::Ignored => {
                    if event == InputEvent::Quit {
                        osk.update_sdi(sdi);
                        return Ok(None);
                    }
                },
                OskOutcome::Consumed => {},
            }
        }

        osk.update_sdi(sdi);
        backend.clear(Color::BLACK)?;
        sdi.draw(backend)?;
        backend.swap_buffers()?;
    }
}
