//! Prompt and generation limits from TOML (`[limits]` section)

use debate_application::DEFAULT_MAX_INPUT_TOKENS;
use debate_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_TEMPERATURE, GenerationOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    /// Largest prompt, in estimated tokens, that may be sent.
    pub max_input_tokens: usize,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}

impl FileLimitsConfig {
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: Some(self.temperature),
            max_tokens: self.max_tokens,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_input_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTokenLimit,
                "limits.max_input_tokens: must be greater than 0",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TemperatureOutOfRange,
                format!(
                    "limits.temperature: {} is outside 0.0..=2.0 and may be rejected",
                    self.temperature
                ),
            ));
        }
        if self.max_tokens == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTokenLimit,
                "limits.max_tokens: must be greater than 0 when set",
            ));
        }
        issues
    }
}
