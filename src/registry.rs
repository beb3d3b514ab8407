// src/registry.rs

//! Process-wide tracking of launched subprocesses.
//!
//! Every launch appends one [`ChildRef`] here, after its message listener
//! has been attached. The registry is append-only: entries are never
//! removed, even once the subprocess has exited. Shutdown handling outside
//! the launch path consults it to terminate whatever is still running.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::types::ScriptKind;

/// Live reference to a launched subprocess, kept for later cleanup.
#[derive(Debug)]
pub struct ChildRef {
    script: ScriptKind,
    pid: Option<u32>,
    kill: Mutex<Option<oneshot::Sender<()>>>,
}

impl ChildRef {
    pub(crate) fn new(script: ScriptKind, pid: Option<u32>, kill: oneshot::Sender<()>) -> Self {
        Self {
            script,
            pid,
            kill: Mutex::new(Some(kill)),
        }
    }

    pub fn script(&self) -> ScriptKind {
        self.script
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Ask the supervising task to kill this subprocess.
    ///
    /// Returns `false` if the subprocess already exited or termination was
    /// already requested.
    pub fn request_termination(&self) -> bool {
        let sender = self
            .kill
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }
}

/// Append-only list of every subprocess launched so far, in launch order.
///
/// Cheaply cloneable; clones share the same underlying list. Appends happen
/// from whichever runtime thread runs the launch, so the list is
/// mutex-protected.
#[derive(Debug, Clone, Default)]
pub struct ChildRegistry {
    children: Arc<Mutex<Vec<ChildRef>>>,
}

impl ChildRegistry {
    pub fn register(&self, child: ChildRef) {
        self.lock().push(child);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Script kinds of all registered children, in launch order.
    pub fn scripts(&self) -> Vec<ScriptKind> {
        self.lock().iter().map(ChildRef::script).collect()
    }

    /// OS pids of all registered children, in launch order.
    pub fn pids(&self) -> Vec<Option<u32>> {
        self.lock().iter().map(ChildRef::pid).collect()
    }

    /// Request termination of every registered child.
    ///
    /// Returns how many requests were actually delivered to a live
    /// supervisor; children that already exited are skipped.
    pub fn terminate_all(&self) -> usize {
        self.lock()
            .iter()
            .filter(|child| child.request_termination())
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChildRef>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
