//! Key definitions and geometry for the on-screen keyboard.

use slate_types::geom::Rect;

use crate::theme;

/// One logical key on the virtual keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OskKey {
    /// A printable character (stored lowercase for letters).
    Char(char),
    /// Sticky case toggle (letter layouts only).
    Shift,
    Space,
    /// Switch to the numeric/symbol layout.
    Symbols,
    /// Switch back to the letter layout.
    Letters,
    /// Move the cursor left.
    Left,
    /// Move the cursor right.
    Right,
    Backspace,
    /// Submit the buffer and end the session.
    Enter,
}

impl OskKey {
    /// Cap label as rendered on the key.
    pub fn label(&self, shift: bool) -> String {
        match self {
            OskKey::Char(c) if shift => c.to_ascii_uppercase().to_string(),
            OskKey::Char(c) => c.to_string(),
            OskKey::Shift => "SHIFT".to_string(),
            OskKey::Space => "SPACE".to_string(),
            OskKey::Symbols => "123".to_string(),
            OskKey::Letters => "ABC".to_string(),
            OskKey::Left => "<".to_string(),
            OskKey::Right => ">".to_string(),
            OskKey::Backspace => "BKSP".to_string(),
            OskKey::Enter => "ENTER".to_string(),
        }
    }
}

/// Character rows of the two layouts.
const LETTER_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const SYMBOL_ROWS: [&str; 3] = ["1234567890", "!@#$%^&*()", "-_=+[]{}"];

/// Full key grid for the requested layout, top row first.
pub fn rows(symbols: bool) -> Vec<Vec<OskKey>> {
    let char_rows = if symbols { &SYMBOL_ROWS } else { &LETTER_ROWS };
    let mut grid: Vec<Vec<OskKey>> = char_rows
        .iter()
        .map(|row| row.chars().map(OskKey::Char).collect())
        .collect();
    grid.push(if symbols {
        vec![
            OskKey::Letters,
            OskKey::Space,
            OskKey::Char('.'),
            OskKey::Left,
            OskKey::Right,
            OskKey::Backspace,
            OskKey::Enter,
        ]
    } else {
        vec![
            OskKey::Shift,
            OskKey::Space,
            OskKey::Symbols,
            OskKey::Left,
            OskKey::Right,
            OskKey::Backspace,
            OskKey::Enter,
        ]
    });
    grid
}

/// Geometry of the keyboard screen.
#[derive(Debug, Clone)]
pub struct OskConfig {
    pub screen_w: u32,
    pub screen_h: u32,
    pub key_w: u32,
    pub key_h: u32,
    pub padding: u32,
    /// Top of the key grid.
    pub start_y: i32,
    /// Input field rectangle.
    pub input: Rect,
    /// Inner horizontal padding of the input field.
    pub input_pad: u32,
    pub input_font: u16,
    pub key_font: u16,
    pub label_font: u16,
    /// Pixels kept between the cursor and the field edge while following.
    pub follow_margin: u32,
}

impl OskConfig {
    /// Proportional layout for a screen, mirroring a phone keyboard:
    /// input field on top, four key rows in the lower half.
    pub fn for_screen(screen_w: u32, screen_h: u32) -> Self {
        let padding = (screen_w * 12 / 1000).max(2);
        let key_w = screen_w * 8 / 100;
        let key_h = screen_h * 12 / 100;
        let start_y = (screen_h * 45 / 100) as i32;
        let input = Rect::new(
            padding as i32,
            padding as i32,
            screen_w.saturating_sub(2 * padding),
            screen_h / 5,
        );
        Self {
            screen_w,
            screen_h,
            key_w,
            key_h,
            padding,
            start_y,
            input,
            input_pad: 10,
            input_font: theme::FONT_LG,
            key_font: theme::FONT_MD,
            label_font: theme::FONT_SM,
            follow_margin: 20,
        }
    }
}

impl Default for OskConfig {
    fn default() -> Self {
        Self::for_screen(theme::SCREEN_W, theme::SCREEN_H)
    }
}

/// Hit rects for every key of the layout, rows centered horizontally.
pub fn key_rects(config: &OskConfig, symbols: bool) -> Vec<(Rect, OskKey)> {
    let mut out = Vec::new();
    let mut y = config.start_y;
    for row in rows(symbols) {
        let row_w = row.len() as u32 * (config.key_w + config.padding) - config.padding;
        let mut x = (config.screen_w.saturating_sub(row_w)) as i32 / 2;
        for key in row {
            out.push((Rect::new(x, y, config.key_w, config.key_h), key));
            x += (config.key_w + config.padding) as i32;
        }
        y += (config.key_h + config.padding) as i32;
    }
    out
}
