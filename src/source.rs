//! Script and query sources.

use crate::error::ExecutionError;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a script's text comes from. Sources are read-only and loaded fully before execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// A SQL file on disk.
    File(PathBuf),
    /// SQL text held in memory, with a name used in progress reports.
    Inline { name: String, text: String },
}

impl ScriptSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Human-readable name: the file path, or the inline source's name.
    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline { name, .. } => name.clone(),
        }
    }

    /// Loads the full text of the source in one pass.
    pub fn load(&self) -> Result<String, ExecutionError> {
        match self {
            Self::File(path) => read_file(path),
            Self::Inline { text, .. } => Ok(text.clone()),
        }
    }
}

impl From<&Path> for ScriptSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<PathBuf> for ScriptSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

fn read_file(path: &Path) -> Result<String, ExecutionError> {
    fs::read_to_string(path).map_err(|source| ExecutionError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}
