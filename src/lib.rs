// src/lib.rs

pub mod cli;
pub mod context;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod messages;
pub mod pipeline;
pub mod registry;
pub mod types;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::CliArgs;
use crate::context::SharedContext;
use crate::pipeline::{run_formatting_task, run_training_task};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the shared context (script/data locations + child registry)
/// - Ctrl-C handling (terminates registered children)
/// - the two pipeline tasks, training sequenced after formatting
pub async fn run(args: CliArgs) -> Result<()> {
    let ctx = SharedContext::new(args.script_dir, args.data_dir, args.data_file, args.python);

    // Ctrl-C → ask the supervisors to kill whatever is still registered.
    {
        let children = ctx.children.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let delivered = children.terminate_all();
            info!(delivered, "interrupt received; terminating subprocesses");
        });
    }

    info!(data = %ctx.data_file_path().display(), "starting pipeline");

    run_formatting_task(&ctx, || info!("data formatting complete"))
        .await
        .with_context(|| {
            format!(
                "data formatting failed for {}",
                ctx.data_file_path().display()
            )
        })?;

    // Training only starts once formatting has completed successfully.
    run_training_task(&ctx, || info!("forest training complete")).await;

    info!(children = ctx.children.len(), "pipeline finished");
    Ok(())
}
