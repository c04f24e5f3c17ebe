//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chat completion models known to the debate engine (Value Object)
///
/// Known models carry provider quirks that the gateway has to respect
/// (no system role, fixed temperature). Anything else is `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Reasoning models
    O1Mini,
    GptO1Mini,
    O3Mini,
    GptO3Mini,
    // GPT models
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    // DeepSeek models
    DeepSeekChat,
    DeepSeekReasoner,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::O1Mini => "o1-mini",
            Model::GptO1Mini => "gpt-o1-mini",
            Model::O3Mini => "o3-mini",
            Model::GptO3Mini => "gpt-o3-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::DeepSeekChat => "deepseek-chat",
            Model::DeepSeekReasoner => "deepseek-reasoner",
            Model::Custom(s) => s,
        }
    }

    /// Whether the model accepts messages with the `system` role.
    ///
    /// System content for models that don't is folded into the first
    /// user message (see [`ChatRequest::adapted_for`](crate::ChatRequest::adapted_for)).
    pub fn supports_system_role(&self) -> bool {
        !matches!(self, Model::O1Mini | Model::GptO1Mini)
    }

    /// Whether the model only runs at its built-in temperature.
    ///
    /// The temperature parameter is dropped for these models instead of
    /// letting the provider reject the request.
    pub fn has_fixed_temperature(&self) -> bool {
        matches!(
            self,
            Model::O1Mini | Model::GptO1Mini | Model::O3Mini | Model::GptO3Mini
        )
    }

    /// Check if this is a DeepSeek model
    pub fn is_deepseek(&self) -> bool {
        match self {
            Model::DeepSeekChat | Model::DeepSeekReasoner => true,
            Model::Custom(s) => s.starts_with("deepseek"),
            _ => false,
        }
    }
}

impl Default for Model {
    /// Returns the default model (o3-mini)
    fn default() -> Self {
        Model::O3Mini
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "o1-mini" => Model::O1Mini,
            "gpt-o1-mini" => Model::GptO1Mini,
            "o3-mini" => Model::O3Mini,
            "gpt-o3-mini" => Model::GptO3Mini,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "deepseek-chat" => Model::DeepSeekChat,
            "deepseek-reasoner" => Model::DeepSeekReasoner,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
