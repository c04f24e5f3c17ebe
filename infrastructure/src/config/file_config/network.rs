//! Network configuration from TOML (`[network]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, NetworkConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw network configuration
///
/// ```toml
/// [network]
/// proxy = "http://proxy.internal:3128"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNetworkConfig {
    /// Proxy URL for all outbound HTTP.
    pub proxy: Option<String>,
    /// Request timeout; absent waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl FileNetworkConfig {
    pub fn to_network_config(&self) -> (NetworkConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let proxy = match self.proxy.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) => match reqwest::Url::parse(url) {
                Ok(_) => Some(url.to_string()),
                Err(e) => {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidProxy,
                        format!("network.proxy: invalid URL '{url}': {e}"),
                    ));
                    None
                }
            },
        };

        let timeout = self
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        (NetworkConfig { proxy, timeout }, issues)
    }
}
