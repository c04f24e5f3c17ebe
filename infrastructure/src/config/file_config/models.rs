//! Role-based model configuration from TOML (`[models]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// question = "o3-mini"                        # Question generation
/// answer = "gpt-4o"                           # Every answer participant
/// judge = "o3-mini"                           # Satisfaction judge and follow-ups
/// synthesizer = "gpt-4.1"                     # Final synthesis
/// answer_agents = ["gpt-4o", "deepseek-chat"] # One model per participant
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub judge: Option<String>,
    pub synthesizer: Option<String>,
    /// Per-participant models; participant `i` uses entry `i % len`.
    pub answer_agents: Option<Vec<String>>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    format!("models.{field}: model name cannot be empty"),
                )],
            ),
            Some(s) => (Some(Model::from(s.trim())), Vec::new()),
        }
    }

    pub fn parse_question(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("question", self.question.as_ref())
    }

    pub fn parse_answer(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("answer", self.answer.as_ref())
    }

    pub fn parse_judge(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("judge", self.judge.as_ref())
    }

    pub fn parse_synthesizer(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("synthesizer", self.synthesizer.as_ref())
    }

    /// Parse `answer_agents`, skipping (and reporting) empty names.
    pub fn parse_answer_agents(&self) -> (Option<Vec<Model>>, Vec<ConfigIssue>) {
        let Some(names) = &self.answer_agents else {
            return (None, Vec::new());
        };

        let mut issues = Vec::new();
        let mut models = Vec::new();
        for name in names {
            if name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    "models.answer_agents: model name cannot be empty in list",
                ));
            } else {
                models.push(Model::from(name.trim()));
            }
        }
        (Some(models), issues)
    }

    pub fn question_model(&self) -> Model {
        self.parse_question().0.unwrap_or_default()
    }

    pub fn answer_model(&self) -> Model {
        self.parse_answer().0.unwrap_or_default()
    }

    pub fn judge_model(&self) -> Model {
        self.parse_judge().0.unwrap_or_default()
    }

    pub fn synthesizer_model(&self) -> Model {
        self.parse_synthesizer().0.unwrap_or_default()
    }

    /// Models for `count` participants, in participant order.
    pub fn participant_models(&self, count: usize) -> Vec<Model> {
        match self.parse_answer_agents().0 {
            Some(list) if !list.is_empty() => {
                (0..count).map(|i| list[i % list.len()].clone()).collect()
            }
            _ => vec![self.answer_model(); count],
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.parse_question().1);
        issues.extend(self.parse_answer().1);
        issues.extend(self.parse_judge().1);
        issues.extend(self.parse_synthesizer().1);
        issues.extend(self.parse_answer_agents().1);
        issues
    }
}
