// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

use crate::types::ScriptKind;

/// Terminal failure of one subprocess task.
///
/// `Spawn` covers everything that prevents the script from starting at all;
/// `Exit` and `MalformedOutput` cover runs that started but went wrong. All
/// variants reach the caller through the completion path, never as a panic.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The script could not be launched (bad interpreter, bad path).
    #[error("failed to start {script}: {source}")]
    Spawn {
        script: ScriptKind,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the subprocess failed.
    #[error("failed to wait on {script}: {source}")]
    Wait {
        script: ScriptKind,
        #[source]
        source: std::io::Error,
    },

    /// The subprocess exited with a non-zero status.
    #[error("{script} exited with code {code}")]
    Exit { script: ScriptKind, code: i32 },

    /// The subprocess emitted a stdout line that is not valid JSON.
    #[error("{script} emitted a line that is not valid JSON: {line:?}")]
    MalformedOutput { script: ScriptKind, line: String },

    /// The subprocess was killed through the child registry.
    #[error("{script} was terminated before completion")]
    Terminated { script: ScriptKind },

    /// The supervisor task went away without reporting an outcome.
    #[error("lost the supervisor for {script}")]
    SupervisorGone { script: ScriptKind },
}

pub type Result<T> = std::result::Result<T, TaskError>;
