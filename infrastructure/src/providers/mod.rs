//! Chat completion providers
//!
//! | Provider | Default base URL | API key |
//! |----------|------------------|---------|
//! | `openai` | `https://api.openai.com` | `OPENAI_API_KEY` |
//! | `deepseek` | `https://api.deepseek.com` | `DEEPSEEK_API_KEY` |
//! | `local` (Ollama and other local servers) | `http://localhost:11434` | none |
//!
//! All three speak the OpenAI chat completions format, so a single
//! [`ChatCompletionsGateway`] serves them; [`ModelRouter`] picks the
//! endpoint per model.

pub mod chat_completions;
pub mod error;
pub mod routing;

pub use chat_completions::ChatCompletionsGateway;
pub use error::ProviderError;
pub use routing::{ModelRouter, build_client};
