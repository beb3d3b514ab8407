// src/context.rs

//! Shared pipeline context.

use std::path::PathBuf;

use crate::registry::ChildRegistry;

/// Process-wide configuration bag, created once at startup and passed by
/// reference into every task launch.
///
/// The child registry is the only mutable part: the launcher appends to it,
/// shutdown handling outside the launch path reads from it.
#[derive(Debug)]
pub struct SharedContext {
    /// Directory containing the pipeline's Python scripts.
    pub script_dir: PathBuf,
    /// Directory containing input data files.
    pub data_dir: PathBuf,
    /// Name of the selected data file inside `data_dir`.
    pub data_file: String,
    /// Interpreter the scripts are run with.
    pub python_bin: PathBuf,
    /// Every subprocess launched so far, in launch order.
    pub children: ChildRegistry,
}

impl SharedContext {
    pub fn new(
        script_dir: impl Into<PathBuf>,
        data_dir: impl Into<PathBuf>,
        data_file: impl Into<String>,
        python_bin: impl Into<PathBuf>,
    ) -> Self {
        Self {
            script_dir: script_dir.into(),
            data_dir: data_dir.into(),
            data_file: data_file.into(),
            python_bin: python_bin.into(),
            children: ChildRegistry::default(),
        }
    }

    /// Full path of the selected data file, the single positional argument
    /// passed to each script.
    pub fn data_file_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }
}
