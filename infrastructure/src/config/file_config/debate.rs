//! Debate settings from TOML (`[debate]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_MAX_ROUNDS, DEFAULT_NUM_QUESTIONS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Follow-up questions allowed per initial question by default.
pub const DEFAULT_MAX_FOLLOW_UPS: usize = 2;

/// Raw debate configuration
///
/// ```toml
/// [debate]
/// num_questions = 5
/// max_rounds = 2
/// max_follow_ups = 2
/// output_dir = "logs"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub num_questions: usize,
    pub max_rounds: u32,
    pub max_follow_ups: usize,
    /// Directory for transcripts when no output path is given.
    pub output_dir: PathBuf,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            num_questions: DEFAULT_NUM_QUESTIONS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_follow_ups: DEFAULT_MAX_FOLLOW_UPS,
            output_dir: PathBuf::from("."),
        }
    }
}

impl FileDebateConfig {
    /// Default transcript path for a question document: `<output_dir>/<stem>_<suffix>.md`.
    pub fn transcript_path(&self, question_document: &Path, suffix: &str) -> PathBuf {
        let stem = question_document
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "questions".to_string());
        self.output_dir.join(format!("{stem}_{suffix}.md"))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.num_questions == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroQuestions,
                "debate.num_questions: must be at least 1",
            ));
        }
        issues
    }
}
