// src/exec/router.rs

//! Message classification and forwarding for one subprocess stdout stream.
//!
//! Each launched subprocess gets its own router task, so messages from a
//! single subprocess are forwarded strictly in arrival order, one at a
//! time. No ordering holds across two different subprocesses.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, ChildStdout};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::messages::InboundMessage;
use crate::types::ScriptKind;

/// Destination for classified subprocess messages.
///
/// Production code uses [`TracingSink`]; tests can provide their own
/// implementation that records what was forwarded.
pub trait MessageSink: Send + Sync {
    /// Forwarded print output from the subprocess.
    fn console_log(&self, script: ScriptKind, text: &str);

    /// Any other message, passed through with its raw JSON payload.
    fn diagnostic(&self, script: ScriptKind, message: &Value);
}

/// Sink backed by `tracing`, used in production.
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn console_log(&self, script: ScriptKind, text: &str) {
        info!(script = %script, "subprocess says: {text}");
    }

    fn diagnostic(&self, script: ScriptKind, message: &Value) {
        debug!(script = %script, "unclassified message: {message}");
    }
}

/// Everything the router observed over the lifetime of one stream.
#[derive(Debug, Default)]
pub(crate) struct RouterOutput {
    /// All classified messages, in arrival order.
    pub(crate) messages: Vec<InboundMessage>,
    /// First stdout line that failed JSON decoding, if any.
    pub(crate) malformed: Option<String>,
}

/// Attach a listener to the subprocess stdout stream.
///
/// Every line is decoded as one JSON value, classified, forwarded to
/// `sink`, and collected. A line that fails to decode is recorded as the
/// run's malformed-output marker; the rest of the stream is still drained
/// and forwarded best-effort. Forwarding itself never fails.
///
/// A missing stdout pipe disables forwarding but is not an error.
pub(crate) fn spawn_router(
    script: ScriptKind,
    stdout: Option<ChildStdout>,
    sink: Arc<dyn MessageSink>,
) -> JoinHandle<RouterOutput> {
    tokio::spawn(async move {
        let mut output = RouterOutput::default();

        let Some(stdout) = stdout else {
            warn!(script = %script, "no stdout pipe available; message forwarding disabled");
            return output;
        };

        let reader = BufReader::new(stdout);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            // Blank lines are not messages.
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(&line) {
                Ok(value) => {
                    let message = InboundMessage::classify(value);
                    route(script, &message, sink.as_ref());
                    output.messages.push(message);
                }
                Err(err) => {
                    debug!(script = %script, error = %err, "stdout line is not valid JSON");
                    output.malformed.get_or_insert(line);
                }
            }
        }

        debug!(script = %script, "message stream ended");
        output
    })
}

fn route(script: ScriptKind, message: &InboundMessage, sink: &dyn MessageSink) {
    match message {
        InboundMessage::ConsoleLog { text } => sink.console_log(script, text),
        InboundMessage::Unrecognized(value) => sink.diagnostic(script, value),
    }
}

/// Always consume stderr so buffers don't fill; log at debug.
pub(crate) fn drain_stderr(script: ScriptKind, stderr: Option<ChildStderr>) {
    let Some(stderr) = stderr else {
        return;
    };

    tokio::spawn(async move {
        let reader = BufReader::new(stderr);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            debug!(script = %script, "stderr: {}", line);
        }
    });
}
