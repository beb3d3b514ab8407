// src/pipeline.rs

//! Task entry points and their completion policies.
//!
//! Both tasks share the same launch shape and differ only in what a
//! failure means. Formatting is a precondition for training, so its
//! failure aborts the pipeline and the continuation is skipped. A training
//! failure is logged and swallowed, and the continuation still runs.

use tracing::{debug, error};

use crate::context::SharedContext;
use crate::errors::Result;
use crate::exec::launch;
use crate::types::ScriptKind;

/// Run the data-formatting subprocess to completion.
///
/// On success `on_done` is invoked with no arguments; the collected
/// message list is observed here and not forwarded. On any failure the
/// error is returned and `on_done` is never invoked.
pub async fn run_formatting_task<F>(ctx: &SharedContext, on_done: F) -> Result<()>
where
    F: FnOnce() + Send,
{
    let handle = launch(ctx, ScriptKind::DataFormatter);
    let results = handle.wait().await?;
    debug!(messages = results.len(), "data formatting results collected");
    on_done();
    Ok(())
}

/// Run the forest-training subprocess to completion.
///
/// `on_done` is invoked exactly once, after the subprocess has exited,
/// whether the run succeeded or failed. A failure is logged and swallowed.
pub async fn run_training_task<F>(ctx: &SharedContext, on_done: F)
where
    F: FnOnce() + Send,
{
    let handle = launch(ctx, ScriptKind::Trainer);
    match handle.wait().await {
        Ok(results) => debug!(messages = results.len(), "training results collected"),
        Err(err) => error!(error = %err, "forest training failed"),
    }
    on_done();
}
