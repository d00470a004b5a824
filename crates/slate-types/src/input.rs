//! Platform-agnostic input event types.
//!
//! Every backend maps its native input to these enums. The core framework
//! never sees raw platform input.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer (mouse or touch) pressed at absolute position.
    PointerDown { x: i32, y: i32 },
    /// Pointer moved while tracking.
    PointerMove { x: i32, y: i32 },
    /// Pointer released.
    PointerUp { x: i32, y: i32 },
    /// Scroll-wheel step; positive scrolls the content up.
    Wheel { delta: i32 },
    /// A physical key pressed.
    KeyPress(Key),
    /// A physical key released.
    KeyRelease(Key),
    /// Character typed on a physical keyboard.
    TextInput(char),
    /// The window gained focus.
    FocusGained,
    /// The window lost focus.
    FocusLost,
    /// User requested quit (window close, etc.).
    Quit,
}

/// Physical keys the shell cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Space,
    Shift,
    Tab,
    Escape,
}
