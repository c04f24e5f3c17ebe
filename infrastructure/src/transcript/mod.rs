//! Markdown transcript file
//!
//! The header is written once by `start`, which creates or truncates the
//! file. Sections are appended with the file opened in append mode, so a
//! failed append never disturbs what is already on disk.

use debate_application::ports::transcript::{TranscriptError, TranscriptSink};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MarkdownTranscriptFile {
    path: PathBuf,
    started: bool,
}

impl MarkdownTranscriptFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            started: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> TranscriptError {
        TranscriptError::Io {
            location: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl TranscriptSink for MarkdownTranscriptFile {
    fn start(&mut self, header: &str) -> Result<(), TranscriptError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, header).map_err(|e| self.io_error(e))?;

        debug!("Started transcript {}", self.path.display());
        self.started = true;
        Ok(())
    }

    fn append(&mut self, section: &str) -> Result<(), TranscriptError> {
        if !self.started {
            return Err(TranscriptError::NotStarted);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(section.as_bytes())
            .map_err(|e| self.io_error(e))?;
        debug!("Appended {} bytes to {}", section.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report_debate_log.md");
        let mut transcript = MarkdownTranscriptFile::new(&path);

        transcript.start("# Header\n\n").unwrap();
        transcript.append("## Question 1\n").unwrap();
        transcript.append("## Question 2\n").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Header\n\n## Question 1\n## Question 2\n"
        );
    }

    #[test]
    fn test_start_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.md");
        fs::write(&path, "old content from an earlier run").unwrap();

        let mut transcript = MarkdownTranscriptFile::new(&path);
        transcript.start("# New\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# New\n");
    }

    #[test]
    fn test_append_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut transcript = MarkdownTranscriptFile::new(dir.path().join("log.md"));

        assert_eq!(transcript.append("x"), Err(TranscriptError::NotStarted));
        assert!(!transcript.path().exists());
    }

    #[test]
    fn test_failed_append_keeps_written_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.md");
        let mut transcript = MarkdownTranscriptFile::new(&path);
        transcript.start("# Header\n").unwrap();
        transcript.append("section one\n").unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        let err = transcript.append("section two\n").unwrap_err();
        assert!(matches!(err, TranscriptError::Io { .. }));

        fs::remove_dir(&path).unwrap();
        fs::write(&path, "# Header\nsection one\n").unwrap();
        transcript.append("section three\n").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Header\nsection one\nsection three\n"
        );
    }

    #[test]
    fn test_start_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut transcript = MarkdownTranscriptFile::new(blocker.join("log.md"));
        assert!(matches!(
            transcript.start("# Header\n"),
            Err(TranscriptError::Io { .. })
        ));
    }
}
