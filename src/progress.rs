//! Progress reporting for effectful steps

use async_trait::async_trait;

/// Receives the step-by-step narrative of a run
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Report a progress message
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
