//! Wire format of the notify protocol.
//!
//! One event per line. Three shapes are recognized:
//!
//! ```text
//! dialogue="Install update?" if=yesrun"updater.sh"
//! message="Low battery"
//! anything else becomes a plain toast
//! ```
//!
//! A `dialogue=`/`message=` prefix without a well-formed quoted payload is a
//! protocol error; callers drop the event rather than crashing the loop.

use slate_types::error::{Result, SlateError};

/// A parsed notify-protocol event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    /// Transient toast.
    Toast { text: String },
    /// Yes/No modal, optionally launching `action` on Yes.
    Dialogue { text: String, action: Option<String> },
    /// Okay-to-dismiss modal.
    Message { text: String },
}

/// Extract the payload of `key"..."` from `line`, if present and closed.
fn quoted_after<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let start = line.find(key)? + key.len();
    let rest = &line[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

impl NotifyEvent {
    /// Parse one trimmed, non-empty line.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(SlateError::Notify("empty line".to_string()));
        }

        if line.starts_with("dialogue=") {
            let text = quoted_after(line, "dialogue=\"")
                .ok_or_else(|| SlateError::Notify(format!("unterminated dialogue payload: {line}")))?;
            // A malformed action degrades to a plain dialogue; the prompt is
            // still worth showing.
            let action = if line.contains("if=yesrun") {
                let parsed = quoted_after(line, "if=yesrun\"");
                if parsed.is_none() {
                    log::warn!("ignoring malformed dialogue action: {line}");
                }
                parsed.map(str::to_string)
            } else {
                None
            };
            return Ok(NotifyEvent::Dialogue {
                text: text.to_string(),
                action,
            });
        }

        if line.starts_with("message=") {
            let text = quoted_after(line, "message=\"")
                .ok_or_else(|| SlateError::Notify(format!("unterminated message payload: {line}")))?;
            return Ok(NotifyEvent::Message {
                text: text.to_string(),
            });
        }

        Ok(NotifyEvent::Toast {
            text: line.to_string(),
        })
    }
}
