use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to access the root of an analysis request.
///
/// Failures below the root never surface here; they are absorbed as zero-byte
/// contributions (and optionally reported as warnings).
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum AnalyzeError {
    #[error("stat {}: {reason}", .path.display())]
    Stat { path: PathBuf, reason: String },

    #[error("read dir {}: {reason}", .path.display())]
    ReadDir { path: PathBuf, reason: String },
}

impl AnalyzeError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Stat { path, .. } | Self::ReadDir { path, .. } => path,
        }
    }
}
