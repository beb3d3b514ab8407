// src/messages.rs

//! Messages received from a subprocess.
//!
//! Each line of subprocess stdout is one self-contained JSON value. The
//! known tag set is closed: `"console.log"` is forwarded print output, and
//! anything else is kept as raw JSON for the diagnostic sink.

use serde_json::Value;

/// Tag carried by forwarded print output.
pub const CONSOLE_LOG_TAG: &str = "console.log";

/// One parsed message from a subprocess stdout stream.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// `{"type": "console.log", "text": ...}` — print output from the
    /// subprocess, destined for the console sink.
    ConsoleLog { text: String },
    /// Any other message, kept verbatim for the diagnostic sink. This also
    /// covers values with no `type` field and `console.log` values missing
    /// a `text` payload.
    Unrecognized(Value),
}

impl InboundMessage {
    /// Classify one decoded JSON value by its `type` tag.
    ///
    /// Classification is total: every value lands in exactly one variant.
    /// A non-string `text` is stringified rather than rejected, matching
    /// the loosely-typed stream the scripts produce.
    pub fn classify(value: Value) -> Self {
        if value.get("type").and_then(Value::as_str) == Some(CONSOLE_LOG_TAG) {
            let text = match value.get("text") {
                Some(Value::String(text)) => Some(text.clone()),
                Some(other) => Some(other.to_string()),
                None => None,
            };
            if let Some(text) = text {
                return InboundMessage::ConsoleLog { text };
            }
        }
        InboundMessage::Unrecognized(value)
    }
}
