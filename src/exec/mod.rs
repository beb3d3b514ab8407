// src/exec/mod.rs

//! Subprocess execution layer.
//!
//! This module owns everything that touches `tokio::process`:
//!
//! - [`launcher`] builds the interpreter invocation, starts the subprocess,
//!   registers it with the child registry, and supervises it to completion.
//! - [`router`] classifies the subprocess's JSON-line stdout stream and
//!   forwards each message to a [`MessageSink`].

pub mod launcher;
pub mod router;

pub use launcher::{TaskHandle, launch, launch_with_sink};
pub use router::{MessageSink, TracingSink};
