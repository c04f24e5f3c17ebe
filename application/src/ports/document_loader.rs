//! Document loading port

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a document could not be read. Every variant carries the path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied reading file: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Could not decode file as UTF-8: {}", path.display())]
    Decode { path: PathBuf },

    #[error("Path is not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Could not read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl DocumentError {
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::NotFound { path }
            | DocumentError::PermissionDenied { path }
            | DocumentError::Decode { path }
            | DocumentError::NotAFile { path }
            | DocumentError::Io { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DocumentError::NotFound { .. })
    }
}

/// Reads a document's text.
///
/// An empty file is a successful read; callers decide whether empty
/// content is acceptable.
pub trait DocumentLoader: Send + Sync {
    fn read(&self, path: &Path) -> Result<String, DocumentError>;
}
