//! Token estimation port

use debate_domain::Model;

/// Estimates how many tokens a prompt will use for a model.
///
/// Returns `None` when no estimate can be made (unknown encoding, encoder
/// failure). Callers must treat `None` as a failure, not as zero.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, text: &str, model: &Model) -> Option<usize>;
}
