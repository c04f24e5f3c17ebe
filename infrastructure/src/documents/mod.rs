//! Local file system document loader
//!
//! Reads source documents as UTF-8 text and discovers document files in a
//! directory. Errors name the offending path so they can be shown to the
//! operator as-is.

use debate_application::ports::document_loader::{DocumentError, DocumentLoader};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions accepted by default when listing a directory.
pub const DOCUMENT_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Document loader that reads from the local file system.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentLoader;

impl FsDocumentLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for FsDocumentLoader {
    fn read(&self, path: &Path) -> Result<String, DocumentError> {
        let metadata = fs::metadata(path).map_err(|e| io_error(path, e))?;
        if !metadata.is_file() {
            return Err(DocumentError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        debug!("Read {} ({} bytes)", path.display(), content.len());
        Ok(content)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> DocumentError {
    let path = path.to_path_buf();
    match e.kind() {
        ErrorKind::NotFound => DocumentError::NotFound { path },
        ErrorKind::PermissionDenied => DocumentError::PermissionDenied { path },
        ErrorKind::InvalidData => DocumentError::Decode { path },
        _ => DocumentError::Io {
            path,
            message: e.to_string(),
        },
    }
}

/// Whether `path` ends in one of `extensions` (case-insensitive, without the dot).
pub fn has_allowed_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

/// Regular files in `dir` with an allowed extension, sorted by name.
///
/// Subdirectories are not searched.
pub fn list_documents(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, DocumentError> {
    let metadata = fs::metadata(dir).map_err(|e| io_error(dir, e))?;
    if !metadata.is_dir() {
        return Err(DocumentError::Io {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.is_file() && has_allowed_extension(&path, extensions) {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        fs::write(&path, "Revenue was $10M in Q1.").unwrap();

        assert_eq!(
            FsDocumentLoader::new().read(&path).unwrap(),
            "Revenue was $10M in Q1."
        );
    }

    #[test]
    fn test_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = FsDocumentLoader::new().read(&path).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsDocumentLoader::new().read(dir.path()).unwrap_err();
        assert!(matches!(err, DocumentError::NotAFile { .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();

        let err = FsDocumentLoader::new().read(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Decode { .. }));
    }

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension(Path::new("a/report.md"), &DOCUMENT_EXTENSIONS));
        assert!(has_allowed_extension(Path::new("NOTES.TXT"), &DOCUMENT_EXTENSIONS));
        assert!(!has_allowed_extension(Path::new("report.pdf"), &DOCUMENT_EXTENSIONS));
        assert!(!has_allowed_extension(Path::new("README"), &DOCUMENT_EXTENSIONS));
    }

    #[test]
    fn test_list_documents_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.md", "a.txt", "c.pdf"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let docs = list_documents(dir.path(), &DOCUMENT_EXTENSIONS).unwrap();
        let names: Vec<_> = docs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.md"]);
    }
}
