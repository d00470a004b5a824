//! On-screen keyboard.
//!
//! A full-screen modal editor: an input field with a cursor on top, four key
//! rows below. Pointer taps and physical key events funnel into the same
//! [`OskKey`] application path, so both input methods mutate the buffer
//! identically. The session ends when ENTER submits the buffer; the shell
//! owns the surrounding nested event loop.

pub mod buffer;
pub mod layout;

pub use buffer::TextBuffer;
pub use layout::{key_rects, rows, OskConfig, OskKey};

use slate_platform::{SoundCue, SoundService};
use slate_sdi::helpers::{ensure_panel, ensure_text, hide_prefix};
use slate_sdi::SdiRegistry;
use slate_types::backend::{text_height, text_width};
use slate_types::color::Color;
use slate_types::input::{InputEvent, Key};

use crate::theme;

/// What an event did to the keyboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OskOutcome {
    /// Not the keyboard's business (quit, focus); the caller decides.
    Ignored,
    /// Consumed by the keyboard.
    Consumed,
    /// ENTER was pressed; the finished text is available.
    Submitted,
}

/// Runtime state of one keyboard session.
#[derive(Debug)]
pub struct OskState {
    pub config: OskConfig,
    buffer: TextBuffer,
    shift: bool,
    symbols: bool,
    scroll_px: i32,
    active: bool,
    result: Option<String>,
}

impl OskState {
    pub fn new(config: OskConfig) -> Self {
        Self::with_text(config, "")
    }

    /// Start a session editing existing text.
    pub fn with_text(config: OskConfig, initial: &str) -> Self {
        Self {
            config,
            buffer: TextBuffer::with_text(initial),
            shift: false,
            symbols: false,
            scroll_px: 0,
            active: true,
            result: None,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn symbols(&self) -> bool {
        self.symbols
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn scroll_px(&self) -> i32 {
        self.scroll_px
    }

    /// The submitted text, once ENTER was pressed.
    pub fn confirmed_text(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Take the submitted text out of the session.
    pub fn take_result(&mut self) -> Option<String> {
        self.result.take()
    }

    /// Route one input event. Every accepted key fires a click cue.
    pub fn handle_event(&mut self, event: &InputEvent, sound: &mut dyn SoundService) -> OskOutcome {
        if !self.active {
            return OskOutcome::Ignored;
        }
        match event {
            InputEvent::PointerDown { x, y } => {
                let hit = key_rects(&self.config, self.symbols)
                    .into_iter()
                    .find(|(rect, _)| rect.contains(*x, *y))
                    .map(|(_, key)| key);
                match hit {
                    Some(key) => {
                        sound.play(SoundCue::KeyClick);
                        if self.apply_key(key) {
                            OskOutcome::Submitted
                        } else {
                            OskOutcome::Consumed
                        }
                    },
                    // The keyboard is modal: stray taps go nowhere.
                    None => OskOutcome::Consumed,
                }
            },
            InputEvent::KeyPress(key) => self.physical_key(*key, sound),
            InputEvent::KeyRelease(Key::Shift) => {
                self.shift = false;
                OskOutcome::Consumed
            },
            InputEvent::KeyRelease(_) => OskOutcome::Consumed,
            InputEvent::TextInput(ch) => {
                sound.play(SoundCue::KeyClick);
                let ch = self.cased(*ch);
                self.buffer.insert(ch);
                self.follow_cursor();
                OskOutcome::Consumed
            },
            InputEvent::PointerMove { .. }
            | InputEvent::PointerUp { .. }
            | InputEvent::Wheel { .. } => OskOutcome::Consumed,
            InputEvent::Quit | InputEvent::FocusGained | InputEvent::FocusLost => {
                OskOutcome::Ignored
            },
        }
    }

    fn physical_key(&mut self, key: Key, sound: &mut dyn SoundService) -> OskOutcome {
        let mapped = match key {
            Key::Left => Some(OskKey::Left),
            Key::Right => Some(OskKey::Right),
            Key::Backspace => Some(OskKey::Backspace),
            Key::Space => Some(OskKey::Space),
            Key::Enter => Some(OskKey::Enter),
            Key::Shift => {
                // Physical shift is momentary, unlike the sticky on-screen key.
                sound.play(SoundCue::KeyClick);
                self.shift = true;
                return OskOutcome::Consumed;
            },
            Key::Tab => {
                sound.play(SoundCue::KeyClick);
                self.symbols = !self.symbols;
                self.shift = false;
                return OskOutcome::Consumed;
            },
            Key::Up | Key::Down | Key::Escape => None,
        };
        match mapped {
            Some(osk_key) => {
                sound.play(SoundCue::KeyClick);
                if self.apply_key(osk_key) {
                    OskOutcome::Submitted
                } else {
                    OskOutcome::Consumed
                }
            },
            None => OskOutcome::Consumed,
        }
    }

    /// Case a typed character according to the current mode.
    fn cased(&self, ch: char) -> char {
        if self.symbols {
            ch
        } else if self.shift {
            ch.to_ascii_uppercase()
        } else {
            ch.to_ascii_lowercase()
        }
    }

    /// Apply one logical key. Returns `true` when the session submitted.
    fn apply_key(&mut self, key: OskKey) -> bool {
        match key {
            OskKey::Char(c) => {
                let ch = self.cased(c);
                self.buffer.insert(ch);
            },
            OskKey::Shift => self.shift = !self.shift,
            OskKey::Symbols => {
                // Mutually exclusive with shift.
                self.symbols = true;
                self.shift = false;
            },
            OskKey::Letters => self.symbols = false,
            OskKey::Space => self.buffer.insert(' '),
            OskKey::Left => self.buffer.move_left(),
            OskKey::Right => self.buffer.move_right(),
            OskKey::Backspace => self.buffer.backspace(),
            OskKey::Enter => {
                self.result = Some(self.buffer.content().to_string());
                self.active = false;
                return true;
            },
        }
        self.follow_cursor();
        false
    }

    /// Keep the cursor glyph inside the visible input width, with a margin
    /// on both sides. Recomputed after every buffer mutation.
    fn follow_cursor(&mut self) {
        let cursor_px = text_width(self.buffer.prefix(), self.config.input_font) as i32;
        let visible = self.config.input.w.saturating_sub(2 * self.config.input_pad) as i32;
        let margin = self.config.follow_margin as i32;
        if cursor_px - self.scroll_px > visible {
            self.scroll_px = cursor_px - visible + margin;
        }
        if cursor_px - self.scroll_px < 0 {
            self.scroll_px = (cursor_px - margin).max(0);
        }
    }

    /// Synchronize SDI objects for the keyboard screen.
    pub fn update_sdi(&self, sdi: &mut SdiRegistry) {
        hide_prefix(sdi, "osk_");
        if !self.active {
            return;
        }
        let cfg = &self.config;

        let bg = ensure_panel(
            sdi,
            "osk_bg",
            0,
            0,
            cfg.screen_w,
            cfg.screen_h,
            0,
            Color::BLACK,
        );
        bg.z = theme::Z_OSK;

        let input = ensure_panel(
            sdi,
            "osk_input",
            cfg.input.x,
            cfg.input.y,
            cfg.input.w,
            cfg.input.h,
            8,
            theme::INPUT_BG,
        );
        input.z = theme::Z_OSK + 1;

        // Window the buffer text to the visible field width so the scroll
        // offset never paints outside the box.
        let char_w = text_width("x", cfg.input_font) as i32;
        let visible = cfg.input.w.saturating_sub(2 * cfg.input_pad) as i32;
        let skip = (self.scroll_px / char_w.max(1)) as usize;
        let shown: String = self
            .buffer
            .content()
            .chars()
            .skip(skip)
            .take((visible / char_w.max(1)) as usize + 2)
            .collect();
        let off = skip as i32 * char_w - self.scroll_px;
        let text = ensure_text(
            sdi,
            "osk_text",
            &shown,
            cfg.input.x + cfg.input_pad as i32 + off,
            cfg.input.y + cfg.input_pad as i32,
            cfg.input_font,
            theme::TEXT_PRIMARY,
        );
        text.z = theme::Z_OSK + 2;

        let cursor_px = text_width(self.buffer.prefix(), cfg.input_font) as i32;
        let caret = ensure_panel(
            sdi,
            "osk_caret",
            cfg.input.x + cfg.input_pad as i32 + cursor_px - self.scroll_px,
            cfg.input.y + cfg.input_pad as i32,
            2,
            text_height(cfg.input_font),
            0,
            theme::TEXT_PRIMARY,
        );
        caret.z = theme::Z_OSK + 3;

        let cap_shift = self.shift && !self.symbols;
        for (i, (rect, key)) in key_rects(cfg, self.symbols).into_iter().enumerate() {
            let active_key = matches!(key, OskKey::Shift) && self.shift;
            let bg = ensure_panel(
                sdi,
                &format!("osk_key_{i}_bg"),
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                6,
                if active_key {
                    theme::KEY_BG_ACTIVE
                } else {
                    theme::KEY_BG
                },
            );
            bg.z = theme::Z_OSK + 1;

            let label = key.label(cap_shift);
            let font = if matches!(key, OskKey::Char(_)) {
                cfg.key_font
            } else {
                cfg.label_font
            };
            let label_w = text_width(&label, font);
            let label_h = text_height(font);
            let obj = ensure_text(
                sdi,
                &format!("osk_key_{i}_label"),
                &label,
                rect.center_x() - label_w as i32 / 2,
                rect.center_y() - label_h as i32 / 2,
                font,
                theme::KEY_TEXT,
            );
            obj.z = theme::Z_OSK + 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::RecordingSound;

    fn state() -> OskState {
        OskState::new(OskConfig::default())
    }

    /// Tap the center of a given key on the current layout.
    fn tap(osk: &mut OskState, target: OskKey, sound: &mut RecordingSound) -> OskOutcome {
        let (rect, _) = key_rects(&osk.config, osk.symbols())
            .into_iter()
            .find(|(_, key)| *key == target)
            .expect("key not on this layout");
        osk.handle_event(
            &InputEvent::PointerDown {
                x: rect.center_x(),
                y: rect.center_y(),
            },
            sound,
        )
    }

    #[test]
    fn fresh_session_state() {
        let osk = state();
        assert!(osk.is_active());
        assert!(!osk.shift());
        assert!(!osk.symbols());
        assert_eq!(osk.buffer().content(), "");
        assert_eq!(osk.confirmed_text(), None);
    }

    #[test]
    fn tapping_letters_types_lowercase() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        tap(&mut osk, OskKey::Char('h'), &mut snd);
        tap(&mut osk, OskKey::Char('i'), &mut snd);
        assert_eq!(osk.buffer().content(), "hi");
    }

    #[test]
    fn shift_is_sticky_for_taps() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        tap(&mut osk, OskKey::Shift, &mut snd);
        assert!(osk.shift());
        tap(&mut osk, OskKey::Char('a'), &mut snd);
        tap(&mut osk, OskKey::Char('b'), &mut snd);
        // Still on: shift is a toggle, not one-shot.
        assert_eq!(osk.buffer().content(), "AB");
        tap(&mut osk, OskKey::Shift, &mut snd);
        tap(&mut osk, OskKey::Char('c'), &mut snd);
        assert_eq!(osk.buffer().content(), "ABc");
    }

    #[test]
    fn symbols_mode_disables_shift() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        tap(&mut osk, OskKey::Shift, &mut snd);
        tap(&mut osk, OskKey::Symbols, &mut snd);
        assert!(osk.symbols());
        assert!(!osk.shift());
        tap(&mut osk, OskKey::Char('1'), &mut snd);
        assert_eq!(osk.buffer().content(), "1");
        tap(&mut osk, OskKey::Letters, &mut snd);
        assert!(!osk.symbols());
    }

    #[test]
    fn special_keys_edit_the_buffer() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        tap(&mut osk, OskKey::Char('a'), &mut snd);
        tap(&mut osk, OskKey::Space, &mut snd);
        tap(&mut osk, OskKey::Char('b'), &mut snd);
        assert_eq!(osk.buffer().content(), "a b");
        tap(&mut osk, OskKey::Backspace, &mut snd);
        assert_eq!(osk.buffer().content(), "a ");
        tap(&mut osk, OskKey::Left, &mut snd);
        tap(&mut osk, OskKey::Backspace, &mut snd);
        assert_eq!(osk.buffer().content(), " ");
    }

    #[test]
    fn enter_submits_and_deactivates() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        tap(&mut osk, OskKey::Char('o'), &mut snd);
        tap(&mut osk, OskKey::Char('k'), &mut snd);
        let outcome = tap(&mut osk, OskKey::Enter, &mut snd);
        assert_eq!(outcome, OskOutcome::Submitted);
        assert!(!osk.is_active());
        assert_eq!(osk.confirmed_text(), Some("ok"));
        assert_eq!(osk.take_result(), Some("ok".to_string()));
        assert_eq!(osk.take_result(), None);
    }

    #[test]
    fn physical_and_pointer_input_mutate_identically() {
        let mut snd = RecordingSound::default();

        let mut tapped = state();
        tap(&mut tapped, OskKey::Char('a'), &mut snd);
        tap(&mut tapped, OskKey::Space, &mut snd);
        tap(&mut tapped, OskKey::Char('b'), &mut snd);
        tap(&mut tapped, OskKey::Left, &mut snd);
        tap(&mut tapped, OskKey::Backspace, &mut snd);

        let mut typed = state();
        typed.handle_event(&InputEvent::TextInput('a'), &mut snd);
        typed.handle_event(&InputEvent::KeyPress(Key::Space), &mut snd);
        typed.handle_event(&InputEvent::TextInput('b'), &mut snd);
        typed.handle_event(&InputEvent::KeyPress(Key::Left), &mut snd);
        typed.handle_event(&InputEvent::KeyPress(Key::Backspace), &mut snd);

        assert_eq!(tapped.buffer().content(), typed.buffer().content());
        assert_eq!(tapped.buffer().cursor(), typed.buffer().cursor());
    }

    #[test]
    fn physical_shift_is_momentary() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        osk.handle_event(&InputEvent::KeyPress(Key::Shift), &mut snd);
        osk.handle_event(&InputEvent::TextInput('a'), &mut snd);
        osk.handle_event(&InputEvent::KeyRelease(Key::Shift), &mut snd);
        osk.handle_event(&InputEvent::TextInput('b'), &mut snd);
        assert_eq!(osk.buffer().content(), "Ab");
    }

    #[test]
    fn physical_enter_submits() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        osk.handle_event(&InputEvent::TextInput('x'), &mut snd);
        let outcome = osk.handle_event(&InputEvent::KeyPress(Key::Enter), &mut snd);
        assert_eq!(outcome, OskOutcome::Submitted);
        assert_eq!(osk.confirmed_text(), Some("x"));
    }

    #[test]
    fn typed_chars_follow_shift_case_rules() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        // Uppercase input is forced lowercase while shift is off.
        osk.handle_event(&InputEvent::TextInput('Q'), &mut snd);
        assert_eq!(osk.buffer().content(), "q");
    }

    #[test]
    fn every_accepted_key_clicks() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        tap(&mut osk, OskKey::Char('a'), &mut snd);
        osk.handle_event(&InputEvent::KeyPress(Key::Backspace), &mut snd);
        osk.handle_event(&InputEvent::TextInput('z'), &mut snd);
        assert_eq!(snd.cues.len(), 3);
        assert!(snd.cues.iter().all(|c| *c == SoundCue::KeyClick));
    }

    #[test]
    fn stray_taps_are_consumed_silently() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        let outcome = osk.handle_event(&InputEvent::PointerDown { x: 0, y: 0 }, &mut snd);
        assert_eq!(outcome, OskOutcome::Consumed);
        assert!(snd.cues.is_empty());
    }

    #[test]
    fn quit_is_left_to_the_caller() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        assert_eq!(
            osk.handle_event(&InputEvent::Quit, &mut snd),
            OskOutcome::Ignored
        );
    }

    #[test]
    fn scroll_follows_cursor_to_the_right() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        assert_eq!(osk.scroll_px(), 0);
        // Type far past the visible field width.
        for _ in 0..60 {
            osk.handle_event(&InputEvent::TextInput('m'), &mut snd);
        }
        assert!(osk.scroll_px() > 0);
        // The cursor stays within the visible window.
        let cursor_px = text_width(osk.buffer().prefix(), osk.config.input_font) as i32;
        let visible = (osk.config.input.w - 2 * osk.config.input_pad) as i32;
        let rel = cursor_px - osk.scroll_px();
        assert!(rel >= 0 && rel <= visible);
    }

    #[test]
    fn scroll_follows_cursor_back_left() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        for _ in 0..60 {
            osk.handle_event(&InputEvent::TextInput('m'), &mut snd);
        }
        let scrolled = osk.scroll_px();
        for _ in 0..60 {
            osk.handle_event(&InputEvent::KeyPress(Key::Left), &mut snd);
        }
        assert!(osk.scroll_px() < scrolled);
        assert_eq!(osk.scroll_px(), 0);
    }

    #[test]
    fn update_sdi_builds_the_keyboard_scene() {
        let osk = state();
        let mut sdi = SdiRegistry::new();
        osk.update_sdi(&mut sdi);
        assert!(sdi.get("osk_bg").unwrap().visible);
        assert!(sdi.get("osk_input").unwrap().visible);
        assert!(sdi.get("osk_caret").unwrap().visible);
        let key_count = key_rects(&osk.config, false).len();
        for i in 0..key_count {
            assert!(sdi.get(&format!("osk_key_{i}_bg")).unwrap().visible);
        }
    }

    #[test]
    fn update_sdi_hides_scene_when_inactive() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        let mut sdi = SdiRegistry::new();
        osk.update_sdi(&mut sdi);
        osk.handle_event(&InputEvent::KeyPress(Key::Enter), &mut snd);
        osk.update_sdi(&mut sdi);
        assert!(!sdi.get("osk_bg").unwrap().visible);
    }

    #[test]
    fn shift_key_is_highlighted_when_on() {
        let mut osk = state();
        let mut snd = RecordingSound::default();
        tap(&mut osk, OskKey::Shift, &mut snd);
        let mut sdi = SdiRegistry::new();
        osk.update_sdi(&mut sdi);
        let shift_idx = key_rects(&osk.config, false)
            .iter()
            .position(|(_, k)| *k == OskKey::Shift)
            .unwrap();
        let shift_bg = sdi.get(&format!("osk_key_{shift_idx}_bg")).unwrap();
        assert_eq!(shift_bg.color, theme::KEY_BG_ACTIVE);
    }
}
