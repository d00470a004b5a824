//! Fixed visual constants for the shell.
//!
//! One flat theme; skinning is out of scope for this core.

use slate_types::color::Color;

/// Default portrait screen size.
pub const SCREEN_W: u32 = 360;
pub const SCREEN_H: u32 = 640;

/// Font sizes (multiples of the 8px bitmap glyph).
pub const FONT_SM: u16 = 8;
pub const FONT_MD: u16 = 16;
pub const FONT_LG: u16 = 24;

/// Z layers, back to front.
pub const Z_HOME: i32 = 100;
pub const Z_TOPBAR: i32 = 800;
pub const Z_TOAST: i32 = 900;
pub const Z_CENTER: i32 = 920;
pub const Z_OVERLAY: i32 = 950;
pub const Z_OSK: i32 = 960;

/// Alpha added or removed per frame while fading.
pub const FADE_STEP: u8 = 10;

/// Shared palette.
pub const TOAST_BG: Color = Color::rgba(0, 0, 0, 220);
pub const TOAST_BORDER: Color = Color::rgba(180, 180, 180, 60);
pub const DIM_OVERLAY: Color = Color::rgba(0, 0, 0, 100);
pub const MODAL_BG: Color = Color::rgba(0, 0, 0, 220);
pub const MODAL_BORDER: Color = Color::rgba(255, 255, 255, 120);
pub const BUTTON_BG: Color = Color::rgb(100, 100, 100);
pub const BUTTON_BG_HOVER: Color = Color::rgb(160, 160, 160);
pub const BUTTON_BORDER: Color = Color::WHITE;
pub const PANEL_BG: Color = Color::rgb(30, 30, 30);
pub const PANEL_BORDER: Color = Color::rgb(200, 200, 200);
pub const ROW_BG: Color = Color::rgb(60, 60, 60);
pub const TEXT_PRIMARY: Color = Color::WHITE;
pub const TEXT_DIM: Color = Color::rgb(180, 180, 180);
pub const BAR_BG: Color = Color::rgb(40, 40, 40);
pub const CLOSE_BG: Color = Color::rgb(200, 50, 50);
pub const KEY_BG: Color = Color::rgb(180, 180, 180);
pub const KEY_BG_ACTIVE: Color = Color::rgb(120, 160, 220);
pub const KEY_TEXT: Color = Color::BLACK;
pub const INPUT_BG: Color = Color::rgb(50, 50, 50);
