//! Provider configuration from TOML (`[providers]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, EndpointConfig, ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Endpoint settings shared by every provider table.
///
/// Unset fields fall back to the provider's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Environment variable name for the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl FileEndpointConfig {
    fn to_endpoint(&self, kind: ProviderKind) -> EndpointConfig {
        let defaults = EndpointConfig::for_kind(kind);
        EndpointConfig {
            api_key_env: self.api_key_env.clone().or(defaults.api_key_env),
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            base_url: self
                .base_url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.base_url),
        }
    }
}

/// Raw provider configuration
///
/// # Example
///
/// ```toml
/// [providers]
/// default = "openai"
///
/// [providers.deepseek]
/// api_key_env = "DEEPSEEK_API_KEY"
///
/// [providers.local]
/// base_url = "http://localhost:11434"
///
/// [providers.routing]
/// "llama3:8b" = "local"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Default provider: "openai", "deepseek" or "local".
    pub default: Option<String>,
    pub openai: FileEndpointConfig,
    pub deepseek: FileEndpointConfig,
    pub local: FileEndpointConfig,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
}

impl FileProvidersConfig {
    /// Convert to the domain type; unknown provider names are skipped and reported.
    pub fn to_provider_config(&self) -> (ProviderConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let default = self.default.as_deref().and_then(|name| {
            name.parse::<ProviderKind>()
                .map_err(|e| {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::UnknownProvider,
                        format!("providers.default: {e}"),
                    ))
                })
                .ok()
        });

        let mut routing = HashMap::new();
        let mut entries: Vec<_> = self.routing.iter().collect();
        entries.sort();
        for (model, provider) in entries {
            match provider.parse::<ProviderKind>() {
                Ok(kind) => {
                    routing.insert(model.clone(), kind);
                }
                Err(e) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider,
                    format!("providers.routing.\"{model}\": {e}; entry ignored"),
                )),
            }
        }

        let config = ProviderConfig {
            default,
            routing,
            openai: self.openai.to_endpoint(ProviderKind::OpenAi),
            deepseek: self.deepseek.to_endpoint(ProviderKind::DeepSeek),
            local: self.local.to_endpoint(ProviderKind::Local),
        };
        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::Model;

    #[test]
    fn test_defaults() {
        let (config, issues) = FileProvidersConfig::default().to_provider_config();
        assert!(issues.is_empty());
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_routing_and_overrides() {
        let toml_str = r#"
default = "deepseek"

[openai]
base_url = "https://proxy.example.com/v1"
api_key_env = "MY_OPENAI_KEY"

[routing]
"llama3:8b" = "ollama"
"#;
        let file: FileProvidersConfig = toml::from_str(toml_str).unwrap();
        let (config, issues) = file.to_provider_config();

        assert!(issues.is_empty());
        assert_eq!(config.default, Some(ProviderKind::DeepSeek));
        assert_eq!(config.openai.base_url, "https://proxy.example.com/v1");
        assert_eq!(config.openai.api_key_env.as_deref(), Some("MY_OPENAI_KEY"));
        assert_eq!(config.resolve(&Model::from("llama3:8b")), ProviderKind::Local);
        assert_eq!(config.resolve(&Model::Gpt4o), ProviderKind::DeepSeek);
    }

    #[test]
    fn test_unknown_providers_reported() {
        let mut file = FileProvidersConfig {
            default: Some("azure".into()),
            ..Default::default()
        };
        file.routing.insert("gpt-4o".into(), "bedrock".into());

        let (config, issues) = file.to_provider_config();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.code == ConfigIssueCode::UnknownProvider));
        assert!(issues[0].is_error());
        assert!(!issues[1].is_error());
        assert!(config.default.is_none());
        assert!(config.routing.is_empty());
    }
}
