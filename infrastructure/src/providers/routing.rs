//! Model → provider routing and gateway construction

use super::chat_completions::ChatCompletionsGateway;
use super::error::ProviderError;
use debate_application::ports::llm_gateway::LlmGateway;
use debate_domain::{Model, NetworkConfig, ProviderConfig, ProviderKind};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds one gateway per model, each pointed at the provider the model routes to.
///
/// The HTTP client (proxy, timeout) is built once and shared by every gateway.
pub struct ModelRouter {
    config: ProviderConfig,
    client: Client,
    env: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl ModelRouter {
    pub fn new(config: ProviderConfig, network: &NetworkConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            config,
            client: build_client(network)?,
            env: Box::new(|name| std::env::var(name).ok()),
        })
    }

    /// Replace the environment lookup used for API keys.
    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Box::new(lookup);
        self
    }

    pub fn resolve(&self, model: &Model) -> ProviderKind {
        self.config.resolve(model)
    }

    /// Gateway for `model`, failing if its provider needs a key that is not set.
    pub fn gateway_for(&self, model: &Model) -> Result<Arc<dyn LlmGateway>, ProviderError> {
        let kind = self.resolve(model);
        let endpoint = self.config.endpoint(kind);
        let api_key = self.api_key(kind)?;
        debug!("Routing {} to {} at {}", model, kind, endpoint.base_url);

        Ok(Arc::new(ChatCompletionsGateway::new(
            kind,
            model.clone(),
            &endpoint.base_url,
            api_key,
            self.client.clone(),
        )))
    }

    fn api_key(&self, kind: ProviderKind) -> Result<Option<String>, ProviderError> {
        let endpoint = self.config.endpoint(kind);
        if let Some(key) = &endpoint.api_key {
            return Ok(Some(key.clone()));
        }

        let from_env = endpoint
            .api_key_env
            .as_deref()
            .and_then(|name| (self.env)(name))
            .filter(|key| !key.trim().is_empty());
        if from_env.is_some() || !kind.requires_api_key() {
            return Ok(from_env);
        }

        Err(ProviderError::MissingApiKey {
            provider: kind,
            env: endpoint
                .api_key_env
                .clone()
                .or_else(|| kind.default_api_key_env().map(str::to_string))
                .unwrap_or_default(),
        })
    }
}

/// HTTP client honouring the proxy and timeout settings.
pub fn build_client(network: &NetworkConfig) -> Result<Client, ProviderError> {
    let mut builder = Client::builder();
    if let Some(url) = &network.proxy {
        let proxy = reqwest::Proxy::all(url).map_err(|source| ProviderError::InvalidProxy {
            url: url.clone(),
            source,
        })?;
        info!("Using proxy {url} for model requests");
        builder = builder.proxy(proxy);
    }
    if let Some(timeout) = network.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn router(config: ProviderConfig, keys: &[(&str, &str)]) -> ModelRouter {
        let keys: HashMap<String, String> = keys
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ModelRouter::new(config, &NetworkConfig::default())
            .unwrap()
            .with_env_lookup(move |name| keys.get(name).cloned())
    }

    #[test]
    fn test_openai_needs_key() {
        let router = router(ProviderConfig::default(), &[]);
        let err = router.gateway_for(&Model::Gpt4o).err().unwrap();
        assert!(matches!(
            err,
            ProviderError::MissingApiKey { provider: ProviderKind::OpenAi, ref env } if env == "OPENAI_API_KEY"
        ));
    }

    #[test]
    fn test_key_from_env() {
        let router = router(ProviderConfig::default(), &[("DEEPSEEK_API_KEY", "sk-test")]);
        let gateway = router.gateway_for(&Model::DeepSeekChat).unwrap();
        assert_eq!(gateway.model(), &Model::DeepSeekChat);
        assert_eq!(router.resolve(&Model::DeepSeekChat), ProviderKind::DeepSeek);
    }

    #[test]
    fn test_local_needs_no_key() {
        let mut config = ProviderConfig::default();
        config.routing.insert("llama3:8b".into(), ProviderKind::Local);
        let router = router(config, &[]);
        assert!(router.gateway_for(&Model::from("llama3:8b")).is_ok());
    }

    #[test]
    fn test_configured_key_wins() {
        let mut config = ProviderConfig::default();
        config.openai.api_key = Some("sk-config".into());
        let router = router(config, &[]);
        assert_eq!(router.api_key(ProviderKind::OpenAi).unwrap().as_deref(), Some("sk-config"));
    }

    #[test]
    fn test_build_client_with_proxy_and_timeout() {
        let network = NetworkConfig {
            proxy: Some("http://127.0.0.1:3128".into()),
            timeout: Some(Duration::from_secs(5)),
        };
        assert!(build_client(&network).is_ok());
    }
}
