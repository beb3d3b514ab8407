// src/exec/launcher.rs

//! Subprocess launching and supervision.

use std::process::Stdio;
use std::sync::Arc;

use tokio::process::{Child, Command};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::context::SharedContext;
use crate::errors::{Result, TaskError};
use crate::exec::router::{self, MessageSink, RouterOutput, TracingSink};
use crate::messages::InboundMessage;
use crate::registry::ChildRef;
use crate::types::ScriptKind;

/// Handle to a launched subprocess task.
///
/// The subprocess runs concurrently; [`TaskHandle::wait`] resolves exactly
/// once, and only after the subprocess has fully exited (or failed to
/// start).
#[derive(Debug)]
pub struct TaskHandle {
    script: ScriptKind,
    completion: oneshot::Receiver<Result<Vec<InboundMessage>>>,
}

impl TaskHandle {
    pub fn script(&self) -> ScriptKind {
        self.script
    }

    /// Wait for the subprocess to reach its terminal state.
    ///
    /// Success carries every message collected during the run, in arrival
    /// order.
    pub async fn wait(self) -> Result<Vec<InboundMessage>> {
        match self.completion.await {
            Ok(outcome) => outcome,
            Err(_) => Err(TaskError::SupervisorGone {
                script: self.script,
            }),
        }
    }
}

/// Launch `script` with the production `tracing` sink.
pub fn launch(ctx: &SharedContext, script: ScriptKind) -> TaskHandle {
    launch_with_sink(ctx, script, Arc::new(TracingSink))
}

/// Launch `script` against `ctx`, forwarding its messages to `sink`.
///
/// The invocation is `<python_bin> <script_dir>/<script> <data_path>`, with
/// stdout framed as one JSON value per line. Returns synchronously while
/// the subprocess runs concurrently; a spawn failure is not raised here but
/// surfaces through [`TaskHandle::wait`] as [`TaskError::Spawn`].
///
/// Before this returns, the message listener is attached and the child is
/// appended to `ctx.children`, in that order. A registered child always has
/// a listener.
pub fn launch_with_sink(
    ctx: &SharedContext,
    script: ScriptKind,
    sink: Arc<dyn MessageSink>,
) -> TaskHandle {
    let (done_tx, done_rx) = oneshot::channel();
    let handle = TaskHandle {
        script,
        completion: done_rx,
    };

    let data_path = ctx.data_file_path();
    info!(script = %script, data = %data_path.display(), "starting subprocess");

    let mut cmd = Command::new(&ctx.python_bin);
    cmd.arg(ctx.script_dir.join(script.file_name()))
        .arg(&data_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            // Reported through the completion path, never synchronously.
            let _ = done_tx.send(Err(TaskError::Spawn {
                script,
                source: err,
            }));
            return handle;
        }
    };

    let router = router::spawn_router(script, child.stdout.take(), sink);
    router::drain_stderr(script, child.stderr.take());

    let (kill_tx, kill_rx) = oneshot::channel();
    ctx.children
        .register(ChildRef::new(script, child.id(), kill_tx));

    tokio::spawn(async move {
        let outcome = supervise(script, child, router, kill_rx).await;
        // The receiver is gone if the caller dropped the handle.
        let _ = done_tx.send(outcome);
    });

    handle
}

/// Wait for the subprocess to exit and turn its run into a terminal
/// outcome.
///
/// A non-zero exit wins over malformed output; a termination request wins
/// over both.
async fn supervise(
    script: ScriptKind,
    mut child: Child,
    router: JoinHandle<RouterOutput>,
    mut kill_rx: oneshot::Receiver<()>,
) -> Result<Vec<InboundMessage>> {
    let status = tokio::select! {
        status = child.wait() => {
            status.map_err(|source| TaskError::Wait { script, source })?
        }
        request = &mut kill_rx => match request {
            Ok(()) => {
                info!(script = %script, "termination requested; killing subprocess");
                if let Err(err) = child.kill().await {
                    warn!(script = %script, error = %err, "failed to kill subprocess");
                }
                return Err(TaskError::Terminated { script });
            }
            // Registry entry dropped without a termination request; keep
            // waiting for natural exit.
            Err(_) => child
                .wait()
                .await
                .map_err(|source| TaskError::Wait { script, source })?,
        },
    };

    let output = match router.await {
        Ok(output) => output,
        Err(err) => {
            warn!(script = %script, error = %err, "message router task failed");
            RouterOutput::default()
        }
    };

    let code = status.code().unwrap_or(-1);
    debug!(
        script = %script,
        exit_code = code,
        success = status.success(),
        "subprocess exited"
    );

    if !status.success() {
        return Err(TaskError::Exit { script, code });
    }

    if let Some(line) = output.malformed {
        return Err(TaskError::MalformedOutput { script, line });
    }

    Ok(output.messages)
}
