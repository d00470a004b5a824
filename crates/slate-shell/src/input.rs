//! Event dispatch for the shell's main loop.
//!
//! Per-event priority: notification center first (it intercepts everything
//! while open), then the modal overlay, then the top bar, then home tiles.

use slate_core::context::Services;
use slate_core::input::{InputEvent, Key};
use slate_core::platform::{AppLauncher, SoundService, TimeService};
use slate_core::topbar::TopBarAction;
use slate_core::vfs::Vfs;

use crate::app_state::ShellState;
use crate::home::KEYBOARD_TILE;

/// What the main loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    /// Enter the blocking keyboard session.
    OpenKeyboard,
    Quit,
}

pub fn handle_event(
    event: &InputEvent,
    state: &mut ShellState,
    vfs: &mut dyn Vfs,
    time: &dyn TimeService,
    sound: &mut dyn SoundService,
    launcher: &mut dyn AppLauncher,
) -> InputResult {
    if *event == InputEvent::Quit {
        return InputResult::Quit;
    }

    // The notification center sees everything; while open it owns the input.
    if state.center.handle_event(event, vfs) {
        state.drag_start = None;
        return InputResult::Continue;
    }

    // Modal overlay (dialogue / message).
    match event {
        InputEvent::PointerMove { x, y } => state.manager.handle_pointer_move(*x, *y),
        InputEvent::PointerDown { x, y } => {
            // Reborrow the service handles; they are needed again below.
            let mut svc = Services {
                vfs: &mut *vfs,
                time,
                sound: &mut *sound,
                launcher: &mut *launcher,
            };
            if state.manager.handle_pointer(*x, *y, &mut svc) {
                return InputResult::Continue;
            }
        },
        _ => {},
    }

    match event {
        InputEvent::KeyPress(Key::Escape) => InputResult::Quit,
        InputEvent::PointerDown { x, y } => {
            if state.topbar.handle_pointer(*x, *y) == TopBarAction::CloseRequested {
                return InputResult::Quit;
            }
            // Top-edge presses start a drag; short drags toggle the top bar,
            // long ones are claimed by the notification center above.
            if *y <= 20 {
                state.drag_start = Some(*y);
                return InputResult::Continue;
            }
            if let Some(name) = state.home.hit(*x, *y) {
                if name == KEYBOARD_TILE {
                    return InputResult::OpenKeyboard;
                }
                let duration = state.manager.config().default_duration_frames;
                let mut svc = Services {
                    vfs: &mut *vfs,
                    time,
                    sound: &mut *sound,
                    launcher: &mut *launcher,
                };
                state
                    .manager
                    .push_toast(&format!("Launching {name}..."), duration, &mut svc);
            }
            InputResult::Continue
        },
        InputEvent::PointerUp { y, .. } => {
            if let Some(start) = state.drag_start.take() {
                state.topbar.feed_drag(y - start);
            }
            InputResult::Continue
        },
        _ => InputResult::Continue,
    }
}
