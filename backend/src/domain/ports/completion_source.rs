//! Port for the third-party chat-completion collaborator.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised by completion adapters.
    pub enum CompletionSourceError {
        /// No upstream is configured.
        Unavailable { message: String } => "completion source unavailable: {message}",
        /// The request could not be sent or timed out.
        Transport { message: String } => "completion transport error: {message}",
        /// Upstream answered with a non-success status.
        Status { status: u16, message: String } => "completion upstream returned {status}: {message}",
        /// Upstream payload could not be decoded.
        Decode { message: String } => "completion payload could not be decoded: {message}",
    }
}

/// Produces a single text reply for a topic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Ask the upstream model to write about `topic`.
    async fn complete(&self, topic: &str) -> Result<String, CompletionSourceError>;
}

/// Completion source used when no upstream credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCompletionSource;

#[async_trait]
impl CompletionSource for DisabledCompletionSource {
    async fn complete(&self, _topic: &str) -> Result<String, CompletionSourceError> {
        Err(CompletionSourceError::unavailable(
            "no completion API key configured",
        ))
    }
}
