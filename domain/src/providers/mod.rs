//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types describe where chat requests go without depending on any
//! serialization format. The infrastructure layer converts its TOML
//! structs into them.

use crate::core::model::Model;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which OpenAI-compatible endpoint family serves a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    DeepSeek,
    /// Self-hosted OpenAI-compatible server (Ollama, vLLM, llama.cpp).
    Local,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::OpenAi, ProviderKind::DeepSeek, ProviderKind::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Local => "local",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::DeepSeek => "https://api.deepseek.com",
            ProviderKind::Local => "http://localhost:11434",
        }
    }

    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::DeepSeek => Some("DEEPSEEK_API_KEY"),
            ProviderKind::Local => None,
        }
    }

    /// Local servers accept unauthenticated requests.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Local)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "local" | "ollama" => Ok(ProviderKind::Local),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

/// Endpoint settings for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    pub base_url: String,
}

impl EndpointConfig {
    pub fn for_kind(kind: ProviderKind) -> Self {
        Self {
            api_key_env: kind.default_api_key_env().map(str::to_string),
            api_key: None,
            base_url: kind.default_base_url().to_string(),
        }
    }
}

/// Top-level provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Provider used when neither routing nor the model family decides.
    pub default: Option<ProviderKind>,
    /// Explicit model name → provider overrides.
    pub routing: HashMap<String, ProviderKind>,
    pub openai: EndpointConfig,
    pub deepseek: EndpointConfig,
    pub local: EndpointConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: None,
            routing: HashMap::new(),
            openai: EndpointConfig::for_kind(ProviderKind::OpenAi),
            deepseek: EndpointConfig::for_kind(ProviderKind::DeepSeek),
            local: EndpointConfig::for_kind(ProviderKind::Local),
        }
    }
}

impl ProviderConfig {
    pub fn endpoint(&self, kind: ProviderKind) -> &EndpointConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::DeepSeek => &self.deepseek,
            ProviderKind::Local => &self.local,
        }
    }

    /// Pick the provider for a model.
    ///
    /// Order: explicit routing, then the model family (DeepSeek models go
    /// to DeepSeek), then the configured default, then OpenAI.
    pub fn resolve(&self, model: &Model) -> ProviderKind {
        if let Some(kind) = self.routing.get(model.as_str()) {
            return *kind;
        }
        if model.is_deepseek() {
            return ProviderKind::DeepSeek;
        }
        self.default.unwrap_or(ProviderKind::OpenAi)
    }
}

/// Outbound HTTP settings passed explicitly to gateways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Proxy URL applied to every request.
    pub proxy: Option<String>,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_routing() {
        let mut config = ProviderConfig::default();
        config
            .routing
            .insert("deepseek-chat".to_string(), ProviderKind::Local);
        assert_eq!(config.resolve(&Model::DeepSeekChat), ProviderKind::Local);
    }

    #[test]
    fn test_resolve_family_then_default() {
        let mut config = ProviderConfig::default();
        assert_eq!(config.resolve(&Model::DeepSeekReasoner), ProviderKind::DeepSeek);
        assert_eq!(config.resolve(&Model::O3Mini), ProviderKind::OpenAi);

        config.default = Some(ProviderKind::Local);
        assert_eq!(config.resolve(&Model::O3Mini), ProviderKind::Local);
        assert_eq!(config.resolve(&Model::DeepSeekChat), ProviderKind::DeepSeek);
    }

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("ollama".parse::<ProviderKind>().unwrap(), ProviderKind::Local);
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_local_needs_no_key() {
        assert!(!ProviderKind::Local.requires_api_key());
        assert!(EndpointConfig::for_kind(ProviderKind::Local).api_key_env.is_none());
        assert!(ProviderKind::DeepSeek.requires_api_key());
    }
}
