//! Loaded source documents

use std::path::Path;

/// Text content of a source document together with its display name.
///
/// The display name is the file's base name; it is what transcripts and
/// progress messages show, never the full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    content: String,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Build a document named after the base name of `path`.
    pub fn from_path(path: &Path, content: impl Into<String>) -> Self {
        Self::new(display_name(path), content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// An empty file is a valid document; callers decide whether it is usable.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Base name of a path for display, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
