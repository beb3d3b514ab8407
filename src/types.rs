// src/types.rs

use std::fmt;

/// Identifies which of the two fixed pipeline scripts a subprocess runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    /// `rfDataFormatting.py` — normalises the raw input data for training.
    DataFormatter,
    /// `rfTrainer.py` — fits the forest on the formatted data.
    Trainer,
}

impl ScriptKind {
    /// File name of the script inside the configured script directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ScriptKind::DataFormatter => "rfDataFormatting.py",
            ScriptKind::Trainer => "rfTrainer.py",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
