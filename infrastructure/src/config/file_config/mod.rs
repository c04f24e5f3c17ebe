//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types on use.

mod debate;
mod limits;
mod logging;
mod models;
mod network;
mod output;
mod providers;
mod repl;

pub use debate::{DEFAULT_MAX_FOLLOW_UPS, FileDebateConfig};
pub use limits::FileLimitsConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use network::FileNetworkConfig;
pub use output::FileOutputConfig;
pub use providers::{FileEndpointConfig, FileProvidersConfig};
pub use repl::FileReplConfig;

use debate_domain::{ConfigIssue, NetworkConfig, ProviderConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used, with every error-level issue found.
#[derive(Error, Debug)]
#[error("invalid configuration: {}", .issues.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("; "))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    pub providers: FileProvidersConfig,
    pub network: FileNetworkConfig,
    pub limits: FileLimitsConfig,
    pub debate: FileDebateConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.models.validate();
        issues.extend(self.providers.to_provider_config().1);
        issues.extend(self.network.to_network_config().1);
        issues.extend(self.limits.validate());
        issues.extend(self.debate.validate());
        issues
    }

    /// Warnings for the caller to print, or an error if any issue is fatal.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        self.providers.to_provider_config().0
    }

    pub fn network_config(&self) -> NetworkConfig {
        self.network.to_network_config().0
    }
}
