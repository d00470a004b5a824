//! Pull-down notification center.
//!
//! A panel listing the persisted notification history, opened by dragging
//! down from the top edge past a distance threshold (or via `open`). While
//! open it owns all pointer input: taps outside the panel or on the close
//! button dismiss it, wheel events scroll the list clamped to its content.

use slate_sdi::helpers::{ensure_panel, ensure_text, hide_prefix};
use slate_sdi::SdiRegistry;
use slate_types::geom::Rect;
use slate_types::input::{InputEvent, Key};
use slate_vfs::Vfs;

use crate::notify::log::{NotifyLog, CLEARED_MARKER};
use crate::theme;

/// Tuning knobs for the notification center.
#[derive(Debug, Clone)]
pub struct CenterConfig {
    pub screen_w: u32,
    pub screen_h: u32,
    /// Height of one history row.
    pub row_height: u32,
    /// Most rows rendered per frame.
    pub max_rendered: usize,
    /// Pixels scrolled per wheel step.
    pub scroll_step: i32,
    /// Drag distance that opens the panel.
    pub open_threshold: i32,
    /// Drags must start within this many pixels of the top edge.
    pub top_edge: i32,
}

impl CenterConfig {
    pub fn for_screen(screen_w: u32, screen_h: u32) -> Self {
        Self {
            screen_w,
            screen_h,
            row_height: 40,
            max_rendered: 50,
            scroll_step: 20,
            open_threshold: 120,
            top_edge: 20,
        }
    }
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self::for_screen(theme::SCREEN_W, theme::SCREEN_H)
    }
}

/// History bookkeeping lines hidden from the list.
fn is_bookkeeping(line: &str) -> bool {
    line.starts_with("===") || line.contains("Launching") || line.contains(CLEARED_MARKER)
}

/// Runtime state of the pull-down panel.
#[derive(Debug)]
pub struct NotificationCenter {
    config: CenterConfig,
    log: NotifyLog,
    is_open: bool,
    scroll_y: i32,
    entries: Vec<String>,
    drag_start: Option<(i32, i32)>,
    panel: Rect,
    close_btn: Rect,
}

impl NotificationCenter {
    pub fn new(config: CenterConfig, log: NotifyLog) -> Self {
        let panel_h = (config.screen_h * 4 / 5).min(config.screen_h.saturating_sub(40));
        let panel = Rect::new(30, 30, config.screen_w.saturating_sub(60), panel_h);
        let close_btn = Rect::new(panel.right() - 40, panel.y + 10, 25, 25);
        Self {
            config,
            log,
            is_open: false,
            scroll_y: 0,
            entries: Vec::new(),
            drag_start: None,
            panel,
            close_btn,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the panel and reload the history.
    pub fn open(&mut self, vfs: &dyn Vfs) {
        self.is_open = true;
        self.reload(vfs);
    }

    /// Close the panel and reset the scroll position.
    pub fn close(&mut self) {
        self.is_open = false;
        self.scroll_y = 0;
    }

    /// Reload the history from the log, filtering bookkeeping lines.
    pub fn reload(&mut self, vfs: &dyn Vfs) {
        self.entries = self
            .log
            .lines(vfs)
            .into_iter()
            .filter(|l| !is_bookkeeping(l))
            .collect();
        log::debug!("notification center loaded {} entries", self.entries.len());
    }

    /// Entries currently shown, newest first, bounded to `max_rendered`.
    pub fn visible_entries(&self) -> Vec<&str> {
        self.entries
            .iter()
            .rev()
            .take(self.config.max_rendered)
            .map(String::as_str)
            .collect()
    }

    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn viewport(&self) -> Rect {
        Rect::new(
            self.panel.x + 20,
            self.panel.y + 50,
            self.panel.w.saturating_sub(40),
            self.panel.h.saturating_sub(70),
        )
    }

    fn content_height(&self) -> u32 {
        let rows = self.entries.len().min(self.config.max_rendered) as u32;
        20 + rows * self.config.row_height
    }

    fn max_scroll(&self) -> i32 {
        (self.content_height() as i32 - self.viewport().h as i32).max(0)
    }

    fn scroll_by(&mut self, delta: i32) {
        self.scroll_y = (self.scroll_y + delta).clamp(0, self.max_scroll());
    }

    /// Route an input event. Returns `true` when the center consumed it.
    pub fn handle_event(&mut self, event: &InputEvent, vfs: &dyn Vfs) -> bool {
        if self.is_open {
            match event {
                InputEvent::PointerDown { x, y } => {
                    if self.close_btn.contains(*x, *y) || !self.panel.contains(*x, *y) {
                        self.close();
                    }
                },
                InputEvent::Wheel { delta } => {
                    // Positive delta scrolls toward the newest entries.
                    self.scroll_by(-delta * self.config.scroll_step);
                },
                InputEvent::KeyPress(Key::Escape) => self.close(),
                _ => {},
            }
            // An open panel intercepts everything.
            return true;
        }

        match event {
            InputEvent::PointerDown { x, y } if *y <= self.config.top_edge => {
                self.drag_start = Some((*x, *y));
                false
            },
            InputEvent::PointerMove { y, .. } => {
                if let Some((_, start_y)) = self.drag_start {
                    if y - start_y > self.config.open_threshold {
                        self.drag_start = None;
                        self.open(vfs);
                        return true;
                    }
                }
                false
            },
            InputEvent::PointerUp { .. } => {
                self.drag_start = None;
                false
            },
            _ => false,
        }
    }

    /// Synchronize SDI objects.
    pub fn update_sdi(&self, sdi: &mut SdiRegistry) {
        hide_prefix(sdi, "center_");
        if !self.is_open {
            return;
        }

        let dim = ensure_panel(
            sdi,
            "center_dim",
            0,
            0,
            self.config.screen_w,
            self.config.screen_h,
            0,
            theme::DIM_OVERLAY,
        );
        dim.z = theme::Z_CENTER;

        let panel = ensure_panel(
            sdi,
            "center_panel",
            self.panel.x,
            self.panel.y,
            self.panel.w,
            self.panel.h,
            12,
            theme::PANEL_BG,
        );
        panel.z = theme::Z_CENTER + 1;
        panel.border_color = Some(theme::PANEL_BORDER);
        panel.border_width = 2;

        let close = ensure_panel(
            sdi,
            "center_close",
            self.close_btn.x,
            self.close_btn.y,
            self.close_btn.w,
            self.close_btn.h,
            4,
            theme::ROW_BG,
        );
        close.z = theme::Z_CENTER + 2;
        let close_label = ensure_text(
            sdi,
            "center_close_label",
            "X",
            self.close_btn.x + 8,
            self.close_btn.y + 8,
            theme::FONT_SM,
            theme::TEXT_PRIMARY,
        );
        close_label.z = theme::Z_CENTER + 3;

        let title = ensure_text(
            sdi,
            "center_title",
            "Notifications",
            self.panel.x + 20,
            self.panel.y + 14,
            theme::FONT_MD,
            theme::TEXT_PRIMARY,
        );
        title.z = theme::Z_CENTER + 2;

        let viewport = self.viewport();
        if self.entries.is_empty() {
            let empty = ensure_text(
                sdi,
                "center_empty",
                "No notifications",
                viewport.x + 10,
                viewport.y + 10,
                theme::FONT_SM,
                theme::TEXT_DIM,
            );
            empty.z = theme::Z_CENTER + 2;
            return;
        }

        for (i, text) in self.visible_entries().iter().enumerate() {
            let row_y = viewport.y + (i as i32) * self.config.row_height as i32 - self.scroll_y;
            let row = Rect::new(viewport.x, row_y, viewport.w, 30);
            // Skip rows scrolled out of the viewport.
            if row.y < viewport.y || row.bottom() > viewport.bottom() {
                continue;
            }
            let bg = ensure_panel(
                sdi,
                &format!("center_row_{i}_bg"),
                row.x,
                row.y,
                row.w,
                row.h,
                6,
                theme::ROW_BG,
            );
            bg.z = theme::Z_CENTER + 2;
            let label = ensure_text(
                sdi,
                &format!("center_row_{i}_text"),
                text,
                row.x + 10,
                row.y + 10,
                theme::FONT_SM,
                theme::TEXT_PRIMARY,
            );
            label.z = theme::Z_CENTER + 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_vfs::MemoryVfs;

    const LOG_PATH: &str = "/config/notifications_log.txt";

    fn center() -> NotificationCenter {
        NotificationCenter::new(CenterConfig::default(), NotifyLog::new(LOG_PATH))
    }

    fn seeded_vfs(lines: &[&str]) -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        let log = NotifyLog::new(LOG_PATH);
        for line in lines {
            log.append(&mut vfs, "ts", line).unwrap();
        }
        vfs
    }

    #[test]
    fn starts_closed() {
        let c = center();
        assert!(!c.is_open());
    }

    #[test]
    fn open_loads_history() {
        let vfs = seeded_vfs(&["alpha", "beta"]);
        let mut c = center();
        c.open(&vfs);
        assert!(c.is_open());
        assert_eq!(c.visible_entries().len(), 2);
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.open(&vfs);
        assert!(c.visible_entries().is_empty());
    }

    #[test]
    fn bookkeeping_lines_are_filtered() {
        let vfs = seeded_vfs(&["real one", "Launching Files...", CLEARED_MARKER, "real two"]);
        let mut c = center();
        c.open(&vfs);
        let shown = c.visible_entries();
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|l| !l.contains("Launching")));
        // Header line is bookkeeping too.
        assert!(shown.iter().all(|l| !l.starts_with("===")));
    }

    #[test]
    fn newest_entries_come_first_and_are_bounded() {
        let lines: Vec<String> = (0..80).map(|i| format!("entry {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let vfs = seeded_vfs(&refs);
        let mut c = center();
        c.open(&vfs);
        let shown = c.visible_entries();
        assert_eq!(shown.len(), c.config.max_rendered);
        assert!(shown[0].contains("entry 79"));
    }

    #[test]
    fn drag_from_top_edge_opens() {
        let vfs = seeded_vfs(&["x"]);
        let mut c = center();
        assert!(!c.handle_event(&InputEvent::PointerDown { x: 100, y: 5 }, &vfs));
        assert!(!c.handle_event(&InputEvent::PointerMove { x: 100, y: 50 }, &vfs));
        assert!(c.handle_event(&InputEvent::PointerMove { x: 100, y: 200 }, &vfs));
        assert!(c.is_open());
    }

    #[test]
    fn short_drag_does_not_open() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.handle_event(&InputEvent::PointerDown { x: 100, y: 5 }, &vfs);
        c.handle_event(&InputEvent::PointerMove { x: 100, y: 60 }, &vfs);
        c.handle_event(&InputEvent::PointerUp { x: 100, y: 60 }, &vfs);
        assert!(!c.is_open());
        // The released drag is forgotten.
        c.handle_event(&InputEvent::PointerMove { x: 100, y: 300 }, &vfs);
        assert!(!c.is_open());
    }

    #[test]
    fn drag_must_start_at_top_edge() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.handle_event(&InputEvent::PointerDown { x: 100, y: 300 }, &vfs);
        c.handle_event(&InputEvent::PointerMove { x: 100, y: 600 }, &vfs);
        assert!(!c.is_open());
    }

    #[test]
    fn open_panel_consumes_everything() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.open(&vfs);
        assert!(c.handle_event(&InputEvent::PointerMove { x: 1, y: 1 }, &vfs));
        assert!(c.handle_event(&InputEvent::TextInput('x'), &vfs));
    }

    #[test]
    fn click_outside_panel_closes() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.open(&vfs);
        assert!(c.handle_event(&InputEvent::PointerDown { x: 0, y: 0 }, &vfs));
        assert!(!c.is_open());
    }

    #[test]
    fn click_inside_panel_stays_open() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.open(&vfs);
        let (cx, cy) = (c.panel.center_x(), c.panel.center_y());
        c.handle_event(&InputEvent::PointerDown { x: cx, y: cy }, &vfs);
        assert!(c.is_open());
    }

    #[test]
    fn close_button_closes() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.open(&vfs);
        let (bx, by) = (c.close_btn.center_x(), c.close_btn.center_y());
        c.handle_event(&InputEvent::PointerDown { x: bx, y: by }, &vfs);
        assert!(!c.is_open());
    }

    #[test]
    fn escape_closes() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.open(&vfs);
        c.handle_event(&InputEvent::KeyPress(Key::Escape), &vfs);
        assert!(!c.is_open());
    }

    #[test]
    fn wheel_scroll_is_clamped_both_ways() {
        let lines: Vec<String> = (0..60).map(|i| format!("entry {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let vfs = seeded_vfs(&refs);
        let mut c = center();
        c.open(&vfs);

        // Scrolling up past the top clamps to zero.
        c.handle_event(&InputEvent::Wheel { delta: 100 }, &vfs);
        assert_eq!(c.scroll_y(), 0);

        // Scrolling down clamps to the content bound.
        for _ in 0..10_000 {
            c.handle_event(&InputEvent::Wheel { delta: -1 }, &vfs);
        }
        let max = c.max_scroll();
        assert_eq!(c.scroll_y(), max);
        assert!(max > 0);
    }

    #[test]
    fn close_resets_scroll() {
        let lines: Vec<String> = (0..60).map(|i| format!("entry {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let vfs = seeded_vfs(&refs);
        let mut c = center();
        c.open(&vfs);
        c.handle_event(&InputEvent::Wheel { delta: -5 }, &vfs);
        assert!(c.scroll_y() > 0);
        c.close();
        assert_eq!(c.scroll_y(), 0);
    }

    #[test]
    fn update_sdi_hides_panel_when_closed() {
        let mut c = center();
        let mut sdi = SdiRegistry::new();
        c.update_sdi(&mut sdi);
        let vfs = MemoryVfs::new();
        c.open(&vfs);
        c.update_sdi(&mut sdi);
        assert!(sdi.get("center_panel").unwrap().visible);
        c.close();
        c.update_sdi(&mut sdi);
        assert!(!sdi.get("center_panel").unwrap().visible);
    }

    #[test]
    fn update_sdi_shows_empty_placeholder() {
        let vfs = MemoryVfs::new();
        let mut c = center();
        c.open(&vfs);
        let mut sdi = SdiRegistry::new();
        c.update_sdi(&mut sdi);
        assert!(sdi.get("center_empty").unwrap().visible);
    }

    #[test]
    fn update_sdi_renders_rows_within_viewport_only() {
        let lines: Vec<String> = (0..60).map(|i| format!("entry {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let vfs = seeded_vfs(&refs);
        let mut c = center();
        c.open(&vfs);
        let mut sdi = SdiRegistry::new();
        c.update_sdi(&mut sdi);

        let viewport = c.viewport();
        let mut visible_rows = 0;
        for i in 0..c.config.max_rendered {
            if let Ok(obj) = sdi.get(&format!("center_row_{i}_bg")) {
                if obj.visible {
                    visible_rows += 1;
                    assert!(obj.y >= viewport.y);
                    assert!(obj.y + obj.h as i32 <= viewport.bottom());
                }
            }
        }
        assert!(visible_rows > 0);
        assert!(visible_rows < 60);
    }
}
