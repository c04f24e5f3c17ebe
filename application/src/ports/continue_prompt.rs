//! Operator confirmation between follow-up questions

use async_trait::async_trait;

/// Asks the operator whether to go on with the next initial question.
#[async_trait]
pub trait ContinuePrompt: Send + Sync {
    /// `next` is the 1-based number of the question about to start.
    async fn should_continue(&self, next: usize, total: usize) -> bool;
}

/// Never stops; used for unattended runs and tests.
pub struct AlwaysContinue;

#[async_trait]
impl ContinuePrompt for AlwaysContinue {
    async fn should_continue(&self, _next: usize, _total: usize) -> bool {
        true
    }
}
