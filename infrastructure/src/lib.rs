//! Infrastructure layer for doc-debate
//!
//! Adapters for the ports defined in the application layer: the file
//! system, the chat completion providers, token counting and the
//! configuration files.

pub mod config;
pub mod documents;
pub mod logging;
pub mod providers;
pub mod tokens;
pub mod transcript;

pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDebateConfig, FileLimitsConfig,
    FileLoggingConfig, FileModelsConfig, FileNetworkConfig, FileOutputConfig,
    FileProvidersConfig, FileReplConfig,
};
pub use documents::{DOCUMENT_EXTENSIONS, FsDocumentLoader, has_allowed_extension, list_documents};
pub use logging::JsonlConversationLogger;
pub use providers::{ChatCompletionsGateway, ModelRouter, ProviderError, build_client};
pub use tokens::TiktokenEstimator;
pub use transcript::MarkdownTranscriptFile;
