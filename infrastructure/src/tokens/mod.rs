//! BPE token estimation with tiktoken

use debate_application::ports::token_estimator::TokenEstimator;
use debate_domain::Model;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tiktoken_rs::CoreBPE;
use tracing::{debug, warn};

/// Counts tokens with the model's own encoding, or `cl100k_base` for
/// models tiktoken does not know.
///
/// Encoders are loaded once per model name and cached.
#[derive(Default)]
pub struct TiktokenEstimator {
    encoders: Mutex<HashMap<String, Arc<CoreBPE>>>,
}

impl TiktokenEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    fn encoder(&self, model: &Model) -> Option<Arc<CoreBPE>> {
        let mut encoders = self.encoders.lock().ok()?;
        if let Some(bpe) = encoders.get(model.as_str()) {
            return Some(bpe.clone());
        }

        let bpe = match tiktoken_rs::get_bpe_from_model(model.as_str()) {
            Ok(bpe) => bpe,
            Err(_) => {
                debug!("No tiktoken encoding for {}, using cl100k_base", model);
                match tiktoken_rs::cl100k_base() {
                    Ok(bpe) => bpe,
                    Err(e) => {
                        warn!("Failed to load cl100k_base: {e}");
                        return None;
                    }
                }
            }
        };

        let bpe = Arc::new(bpe);
        encoders.insert(model.as_str().to_string(), bpe.clone());
        Some(bpe)
    }
}

impl TokenEstimator for TiktokenEstimator {
    fn estimate(&self, text: &str, model: &Model) -> Option<usize> {
        let bpe = self.encoder(model)?;
        Some(bpe.encode_with_special_tokens(text).len())
    }
}
