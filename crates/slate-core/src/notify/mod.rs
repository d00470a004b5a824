//! Notification subsystem.
//!
//! Four cooperating pieces:
//!
//! - [`event`]: the line-oriented wire format (`dialogue="..."`,
//!   `message="..."`, or a bare toast line).
//! - [`channel`]: the polled notify file; reads at most one pending payload
//!   per cycle and truncates it (at-most-once delivery per write).
//! - [`log`]: the append-only, size-trimmed notification history file.
//! - [`manager`]: toast queue, dialogue FIFO, message slot, overlay buttons,
//!   fade timing, and scene-graph projection.

pub mod channel;
pub mod event;
pub mod log;
pub mod manager;

pub use channel::NotifyChannel;
pub use event::NotifyEvent;
pub use log::NotifyLog;
pub use manager::{
    Dialogue, FadeState, Message, NotificationManager, NotifyConfig, OverlayAnswer, OverlayButton,
    Toast,
};
