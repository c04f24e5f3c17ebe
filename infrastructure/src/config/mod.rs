//! Configuration file loading for doc-debate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DOC_DEBATE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate.toml` or `./.debate.toml`
//! 4. Global: `<config_dir>/doc-debate/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_MAX_FOLLOW_UPS, FileConfig, FileDebateConfig,
    FileEndpointConfig, FileLimitsConfig, FileLoggingConfig, FileModelsConfig, FileNetworkConfig,
    FileOutputConfig, FileProvidersConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
