//! Slide-down top bar.
//!
//! Shows the running app's name and a close button. The bar animates its
//! height by a fixed step per frame and closes itself after a timeout once
//! fully open.

use slate_sdi::helpers::{ensure_panel, ensure_text, hide_prefix};
use slate_sdi::SdiRegistry;
use slate_types::geom::Rect;

use crate::theme;

/// Tuning knobs for the top bar.
#[derive(Debug, Clone)]
pub struct TopBarConfig {
    pub screen_w: u32,
    /// Bar height when fully open.
    pub target_height: u32,
    /// Pixels the bar slides per frame.
    pub slide_step: u32,
    /// Frames a fully open bar stays up before closing itself.
    pub auto_close_frames: u64,
    /// Drag distance that toggles the bar.
    pub drag_threshold: i32,
}

impl TopBarConfig {
    pub fn for_screen(screen_w: u32) -> Self {
        Self {
            screen_w,
            target_height: 30,
            slide_step: 10,
            auto_close_frames: 300,
            drag_threshold: 20,
        }
    }
}

impl Default for TopBarConfig {
    fn default() -> Self {
        Self::for_screen(theme::SCREEN_W)
    }
}

/// What a pointer press on the bar means for the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    Idle,
    /// The close button was pressed; the shell should exit the app.
    CloseRequested,
}

/// Runtime state of the top bar.
#[derive(Debug)]
pub struct TopBar {
    config: TopBarConfig,
    label: String,
    visible: bool,
    current_height: u32,
    /// Frames spent fully open (drives the auto-close).
    open_frames: u64,
    close_btn: Rect,
}

impl TopBar {
    pub fn new(config: TopBarConfig, label: impl Into<String>) -> Self {
        let close_btn = Rect::new(config.screen_w as i32 - 40, 5, 30, 20);
        Self {
            config,
            label: label.into(),
            visible: false,
            current_height: 0,
            open_frames: 0,
            close_btn,
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Fully slid out and interactive.
    pub fn fully_open(&self) -> bool {
        self.current_height == self.config.target_height
    }

    pub fn current_height(&self) -> u32 {
        self.current_height
    }

    /// Toggle the bar and restart the auto-close timer.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        self.open_frames = 0;
    }

    /// Open/close via a drag gesture distance.
    pub fn feed_drag(&mut self, dy: i32) {
        if dy > self.config.drag_threshold {
            self.toggle();
        }
    }

    /// Per-frame tick: slide toward the target and count down to auto-close.
    pub fn update(&mut self) {
        let step = self.config.slide_step;
        if self.visible && self.current_height < self.config.target_height {
            self.current_height = (self.current_height + step).min(self.config.target_height);
        } else if !self.visible && self.current_height > 0 {
            self.current_height = self.current_height.saturating_sub(step);
        }

        if self.visible && self.fully_open() {
            self.open_frames += 1;
            if self.open_frames > self.config.auto_close_frames {
                log::debug!("top bar auto-closing");
                self.visible = false;
                self.open_frames = 0;
            }
        }
    }

    /// Route a pointer press. Only the close button does anything, and only
    /// once the bar is fully open.
    pub fn handle_pointer(&mut self, x: i32, y: i32) -> TopBarAction {
        if self.fully_open() && self.close_btn.contains(x, y) {
            log::info!("top bar close pressed for {}", self.label);
            return TopBarAction::CloseRequested;
        }
        TopBarAction::Idle
    }

    /// Synchronize SDI objects.
    pub fn update_sdi(&self, sdi: &mut SdiRegistry) {
        hide_prefix(sdi, "topbar_");
        if self.current_height == 0 {
            return;
        }

        let bar = ensure_panel(
            sdi,
            "topbar_bg",
            0,
            0,
            self.config.screen_w,
            self.current_height,
            0,
            theme::BAR_BG,
        );
        bar.z = theme::Z_TOPBAR;

        let label = ensure_text(
            sdi,
            "topbar_label",
            &self.label,
            10,
            5,
            theme::FONT_SM,
            theme::TEXT_PRIMARY,
        );
        label.z = theme::Z_TOPBAR + 1;

        if self.fully_open() {
            let close = ensure_panel(
                sdi,
                "topbar_close",
                self.close_btn.x,
                self.close_btn.y,
                self.close_btn.w,
                self.close_btn.h,
                5,
                theme::CLOSE_BG,
            );
            close.z = theme::Z_TOPBAR + 1;
            let x_label = ensure_text(
                sdi,
                "topbar_close_label",
                "X",
                self.close_btn.center_x() - 4,
                self.close_btn.center_y() - 4,
                theme::FONT_SM,
                theme::TEXT_PRIMARY,
            );
            x_label.z = theme::Z_TOPBAR + 2;
        }
    }
}
