//! Recording `MessageSink` for asserting on routed messages.

use std::sync::Mutex;

use rfpipe::exec::MessageSink;
use rfpipe::types::ScriptKind;
use serde_json::Value;

/// One routed message, as observed by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    ConsoleLog { script: ScriptKind, text: String },
    Diagnostic { script: ScriptKind, message: Value },
}

/// Sink that records every routed message, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Texts of recorded `console.log` events, in order.
    pub fn console_texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::ConsoleLog { text, .. } => Some(text),
                SinkEvent::Diagnostic { .. } => None,
            })
            .collect()
    }

    /// Raw payloads of recorded diagnostic events, in order.
    pub fn diagnostics(&self) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Diagnostic { message, .. } => Some(message),
                SinkEvent::ConsoleLog { .. } => None,
            })
            .collect()
    }
}

impl MessageSink for RecordingSink {
    fn console_log(&self, script: ScriptKind, text: &str) {
        self.events.lock().unwrap().push(SinkEvent::ConsoleLog {
            script,
            text: text.to_string(),
        });
    }

    fn diagnostic(&self, script: ScriptKind, message: &Value) {
        self.events.lock().unwrap().push(SinkEvent::Diagnostic {
            script,
            message: message.clone(),
        });
    }
}
