//! Errors raised while constructing provider gateways

use debate_domain::ProviderKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No API key for {provider}: set {env} or providers.{provider}.api_key")]
    MissingApiKey { provider: ProviderKind, env: String },

    #[error("Invalid proxy URL '{url}': {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
