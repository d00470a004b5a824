//! Toast queue and dialogue/message overlay state machine.
//!
//! Draw invariant: at most one of {active dialogue, active message} is shown
//! at a time, and toasts are shown only when neither is active. Buttons are
//! plain rects tagged with an [`OverlayAnswer`]; the manager resolves the
//! answer itself instead of dispatching through per-button callbacks.

use std::collections::VecDeque;

use slate_platform::SoundCue;
use slate_sdi::helpers::{ensure_panel, ensure_text, hide_prefix};
use slate_sdi::SdiRegistry;
use slate_types::backend::{text_height, text_width};
use slate_types::geom::Rect;

use crate::context::Services;
use crate::text::word_wrap;
use crate::theme;

use super::event::NotifyEvent;
use super::log::NotifyLog;

/// Lifecycle phase of a fading element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    FadeIn,
    Visible,
    FadeOut,
}

/// A transient toast notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    /// Frames since push (includes the fade-in period).
    pub age_frames: u64,
    pub duration_frames: u64,
    pub alpha: u8,
    pub fade: FadeState,
}

/// A queued or active Yes/No dialogue.
#[derive(Debug, Clone)]
pub struct Dialogue {
    pub text: String,
    /// Command launched when the user answers Yes.
    pub action: Option<String>,
    pub alpha: u8,
}

/// The active acknowledgment message, if any.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub alpha: u8,
}

/// What a tapped overlay button means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAnswer {
    Yes,
    No,
    Okay,
}

/// A hit-testable overlay button.
#[derive(Debug, Clone)]
pub struct OverlayButton {
    pub rect: Rect,
    pub label: &'static str,
    pub answer: OverlayAnswer,
    pub hover: bool,
}

/// Tuning knobs for the notification manager.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub screen_w: u32,
    pub screen_h: u32,
    /// Most toasts shown at once; the oldest is evicted beyond this.
    pub max_visible: usize,
    /// Alpha step per frame while fading.
    pub fade_step: u8,
    /// Default toast lifetime, in frames.
    pub default_duration_frames: u64,
    /// Fixed modal width; text wraps inside it.
    pub modal_width: u32,
    /// Modal height never shrinks below this.
    pub modal_min_height: u32,
    /// Gap between the modal bottom and the screen bottom.
    pub modal_margin_bottom: u32,
    /// Font for toast and modal body text.
    pub text_font: u16,
    /// Font for button labels.
    pub button_font: u16,
}

impl NotifyConfig {
    /// Defaults for a screen of the given size.
    pub fn for_screen(screen_w: u32, screen_h: u32) -> Self {
        Self {
            screen_w,
            screen_h,
            max_visible: 4,
            fade_step: theme::FADE_STEP,
            default_duration_frames: 180,
            modal_width: (screen_w * 5 / 6).min(400),
            modal_min_height: 120,
            modal_margin_bottom: 100,
            text_font: theme::FONT_SM,
            button_font: theme::FONT_MD,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self::for_screen(theme::SCREEN_W, theme::SCREEN_H)
    }
}

const BUTTON_W: u32 = 100;
const BUTTON_H: u32 = 40;
const BUTTON_SPACING: u32 = 20;
const TOAST_PAD: i32 = 10;

/// Central owner of toasts, dialogues, and messages.
#[derive(Debug)]
pub struct NotificationManager {
    config: NotifyConfig,
    log: NotifyLog,
    toasts: VecDeque<Toast>,
    dialogue_queue: VecDeque<Dialogue>,
    active_dialogue: Option<Dialogue>,
    active_message: Option<Message>,
    buttons: Vec<OverlayButton>,
}

impl NotificationManager {
    pub fn new(config: NotifyConfig, log: NotifyLog) -> Self {
        Self {
            config,
            log,
            toasts: VecDeque::new(),
            dialogue_queue: VecDeque::new(),
            active_dialogue: None,
            active_message: None,
            buttons: Vec::new(),
        }
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Push one raw notify-protocol line. Malformed payloads degrade to a
    /// logged no-op; the frame loop never sees an error.
    pub fn push(&mut self, raw: &str, svc: &mut Services<'_>) {
        match NotifyEvent::parse(raw) {
            Ok(event) => self.push_event(event, svc),
            Err(e) => log::warn!("dropping malformed push: {e}"),
        }
    }

    /// Push an already-parsed event.
    pub fn push_event(&mut self, event: NotifyEvent, svc: &mut Services<'_>) {
        match event {
            NotifyEvent::Toast { text } => {
                self.push_toast(&text, self.config.default_duration_frames, svc);
            },
            NotifyEvent::Dialogue { text, action } => {
                log::debug!("queueing dialogue: {text}");
                self.dialogue_queue.push_back(Dialogue {
                    text,
                    action,
                    alpha: 0,
                });
                svc.cue(SoundCue::Notify);
            },
            NotifyEvent::Message { text } => {
                // No queue: a new message replaces the current one.
                log::debug!("replacing active message: {text}");
                self.active_message = Some(Message { text, alpha: 0 });
                if self.active_dialogue.is_none() {
                    self.buttons = self.message_buttons();
                }
                svc.cue(SoundCue::Notify);
            },
        }
    }

    /// Push a plain toast with an explicit lifetime.
    pub fn push_toast(&mut self, text: &str, duration_frames: u64, svc: &mut Services<'_>) {
        svc.cue(SoundCue::Notify);
        self.toasts.push_back(Toast {
            text: text.to_string(),
            age_frames: 0,
            duration_frames,
            alpha: 0,
            fade: FadeState::FadeIn,
        });
        // Evicted silently; the evicted entry was logged when it was pushed.
        if self.toasts.len() > self.config.max_visible {
            self.toasts.pop_front();
        }
        let ts = svc.timestamp();
        if let Err(e) = self.log.append(svc.vfs, &ts, text) {
            log::error!("failed to log notification: {e}");
        }
    }

    /// Advance all fade timers and promote the next queued dialogue.
    /// Call exactly once per frame, before `update_sdi`.
    pub fn update(&mut self) {
        if self.active_dialogue.is_none() && !self.dialogue_queue.is_empty() {
            self.next_dialogue();
        }

        let step = self.config.fade_step;
        self.toasts.retain_mut(|toast| {
            toast.age_frames += 1;
            match toast.fade {
                FadeState::FadeIn => {
                    toast.alpha = toast.alpha.saturating_add(step);
                    if toast.alpha == u8::MAX {
                        toast.fade = FadeState::Visible;
                    }
                    true
                },
                FadeState::Visible => {
                    if toast.age_frames >= toast.duration_frames {
                        toast.fade = FadeState::FadeOut;
                    }
                    true
                },
                FadeState::FadeOut => {
                    toast.alpha = toast.alpha.saturating_sub(step);
                    toast.alpha > 0
                },
            }
        });

        // Modals fade in only.
        if let Some(d) = self.active_dialogue.as_mut() {
            d.alpha = d.alpha.saturating_add(step);
        }
        if let Some(m) = self.active_message.as_mut() {
            m.alpha = m.alpha.saturating_add(step);
        }

        if self.active_dialogue.is_none() && self.active_message.is_none() {
            self.buttons.clear();
        }
    }

    /// Whether a modal (dialogue or message) currently owns the screen.
    pub fn overlay_active(&self) -> bool {
        self.active_dialogue.is_some() || self.active_message.is_some()
    }

    /// Route a pointer press. Returns `true` when a modal consumed it.
    pub fn handle_pointer(&mut self, x: i32, y: i32, svc: &mut Services<'_>) -> bool {
        if !self.overlay_active() {
            return false;
        }
        let hit = self
            .buttons
            .iter()
            .find(|b| b.rect.contains(x, y))
            .map(|b| b.answer);
        if let Some(answer) = hit {
            self.resolve(answer, svc);
        }
        // A modal blocks everything underneath, hit or not.
        true
    }

    /// Update button hover states from a pointer move.
    pub fn handle_pointer_move(&mut self, x: i32, y: i32) {
        for button in &mut self.buttons {
            button.hover = button.rect.contains(x, y);
        }
    }

    /// Resolve an overlay answer.
    pub fn resolve(&mut self, answer: OverlayAnswer, svc: &mut Services<'_>) {
        match answer {
            OverlayAnswer::Yes => {
                if let Some(dialogue) = self.active_dialogue.take() {
                    if let Some(action) = dialogue.action {
                        if let Err(e) = svc.launcher.launch(&action) {
                            // Best effort: report and move on.
                            log::error!("dialogue action failed: {e}");
                        }
                    }
                }
                self.next_dialogue();
            },
            OverlayAnswer::No => {
                self.active_dialogue = None;
                self.next_dialogue();
            },
            OverlayAnswer::Okay => {
                self.active_message = None;
                self.buttons.clear();
            },
        }
    }

    fn next_dialogue(&mut self) {
        match self.dialogue_queue.pop_front() {
            Some(next) => {
                log::debug!("activating dialogue: {}", next.text);
                self.active_dialogue = Some(next);
                self.buttons = self.dialogue_buttons();
            },
            None => {
                self.active_dialogue = None;
                if self.active_message.is_some() {
                    self.buttons = self.message_buttons();
                } else {
                    self.buttons.clear();
                }
            },
        }
    }

    fn dialogue_buttons(&self) -> Vec<OverlayButton> {
        let total = BUTTON_W * 2 + BUTTON_SPACING;
        let start_x = (self.config.screen_w.saturating_sub(total)) as i32 / 2;
        let y = self.config.screen_h as i32 - 80;
        vec![
            OverlayButton {
                rect: Rect::new(start_x, y, BUTTON_W, BUTTON_H),
                label: "Yes",
                answer: OverlayAnswer::Yes,
                hover: false,
            },
            OverlayButton {
                rect: Rect::new(
                    start_x + (BUTTON_W + BUTTON_SPACING) as i32,
                    y,
                    BUTTON_W,
                    BUTTON_H,
                ),
                label: "No",
                answer: OverlayAnswer::No,
                hover: false,
            },
        ]
    }

    fn message_buttons(&self) -> Vec<OverlayButton> {
        let x = (self.config.screen_w.saturating_sub(BUTTON_W)) as i32 / 2;
        let y = self.config.screen_h as i32 - 80;
        vec![OverlayButton {
            rect: Rect::new(x, y, BUTTON_W, BUTTON_H),
            label: "Okay",
            answer: OverlayAnswer::Okay,
            hover: false,
        }]
    }

    // -- Accessors (used by the shell and tests) --

    pub fn toasts(&self) -> &VecDeque<Toast> {
        &self.toasts
    }

    pub fn active_dialogue(&self) -> Option<&Dialogue> {
        self.active_dialogue.as_ref()
    }

    pub fn active_message(&self) -> Option<&Message> {
        self.active_message.as_ref()
    }

    pub fn queued_dialogues(&self) -> usize {
        self.dialogue_queue.len()
    }

    pub fn buttons(&self) -> &[OverlayButton] {
        &self.buttons
    }

    // -- Scene-graph projection --

    /// Synchronize SDI objects. Call after `update`.
    pub fn update_sdi(&self, sdi: &mut SdiRegistry) {
        hide_prefix(sdi, "toast_");
        hide_prefix(sdi, "modal_");
        hide_prefix(sdi, "overlay_");

        if let Some(dialogue) = self.active_dialogue.as_ref() {
            self.modal_sdi(sdi, &dialogue.text, dialogue.alpha);
        } else if let Some(message) = self.active_message.as_ref() {
            self.modal_sdi(sdi, &message.text, message.alpha);
        } else {
            self.toasts_sdi(sdi);
        }
    }

    fn toasts_sdi(&self, sdi: &mut SdiRegistry) {
        let font = self.config.text_font;
        let mut y = TOAST_PAD;
        for (i, toast) in self.toasts.iter().enumerate() {
            let bg_w = text_width(&toast.text, font) + 20;
            let bg_h = text_height(font) + 10;
            let x = self.config.screen_w as i32 - bg_w as i32 - 20;

            let bg = ensure_panel(
                sdi,
                &format!("toast_bg_{i}"),
                x,
                y,
                bg_w,
                bg_h,
                6,
                theme::TOAST_BG.with_alpha(toast.alpha.min(220)),
            );
            bg.z = theme::Z_TOAST;
            bg.border_color = Some(theme::TOAST_BORDER);
            bg.border_width = 2;

            let label = ensure_text(
                sdi,
                &format!("toast_text_{i}"),
                &toast.text,
                x + 10,
                y + 5,
                font,
                theme::TEXT_PRIMARY.with_alpha(toast.alpha),
            );
            label.z = theme::Z_TOAST + 1;

            y += bg_h as i32 + TOAST_PAD;
        }
    }

    fn modal_sdi(&self, sdi: &mut SdiRegistry, body: &str, alpha: u8) {
        let cfg = &self.config;
        let font = cfg.text_font;
        let width = cfg.modal_width;
        let lines = word_wrap(body, width.saturating_sub(40), font);
        let line_height = text_height(font) + 5;
        let text_block = lines.len() as u32 * line_height + 30;
        let height = text_block.max(cfg.modal_min_height);
        let x = (cfg.screen_w.saturating_sub(width)) as i32 / 2;
        let y = cfg.screen_h as i32 - height as i32 - cfg.modal_margin_bottom as i32;

        let dim = ensure_panel(
            sdi,
            "overlay_dim",
            0,
            0,
            cfg.screen_w,
            cfg.screen_h,
            0,
            theme::DIM_OVERLAY,
        );
        dim.z = theme::Z_OVERLAY;

        let bg = ensure_panel(
            sdi,
            "modal_bg",
            x,
            y,
            width,
            height,
            8,
            theme::MODAL_BG.with_alpha(alpha.min(220)),
        );
        bg.z = theme::Z_OVERLAY + 1;
        bg.border_color = Some(theme::MODAL_BORDER);
        bg.border_width = 2;

        let mut line_y = y + 25;
        for (i, line) in lines.iter().enumerate() {
            let line_x = (cfg.screen_w as i32 - text_width(line, font) as i32) / 2;
            let obj = ensure_text(
                sdi,
                &format!("modal_line_{i}"),
                line,
                line_x,
                line_y,
                font,
                theme::TEXT_PRIMARY.with_alpha(alpha),
            );
            obj.z = theme::Z_OVERLAY + 2;
            line_y += line_height as i32;
        }

        for (i, button) in self.buttons.iter().enumerate() {
            let color = if button.hover {
                theme::BUTTON_BG_HOVER
            } else {
                theme::BUTTON_BG
            };
            let bg = ensure_panel(
                sdi,
                &format!("modal_btn_{i}_bg"),
                button.rect.x,
                button.rect.y,
                button.rect.w,
                button.rect.h,
                8,
                color,
            );
            bg.z = theme::Z_OVERLAY + 2;
            bg.border_color = Some(theme::BUTTON_BORDER);
            bg.border_width = 2;

            let label_w = text_width(button.label, cfg.button_font);
            let label_h = text_height(cfg.button_font);
            let label = ensure_text(
                sdi,
                &format!("modal_btn_{i}_label"),
                button.label,
                button.rect.center_x() - label_w as i32 / 2,
                button.rect.center_y() - label_h as i32 / 2,
                cfg.button_font,
                theme::TEXT_PRIMARY,
            );
            label.z = theme::Z_OVERLAY + 3;
        }
    }
}
