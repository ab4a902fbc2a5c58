//! Provider trait for completion services.

use crate::error::AiError;
use crate::types::*;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Core provider trait for completion services.
///
/// A provider only has to answer a single chat completion. Prompting and
/// validation are handled by the executor, so the provider stays a thin
/// transport: it returns `AiError::Transport` for anything that goes wrong on
/// the wire and never inspects the returned text.
#[async_trait]
pub trait Provider: Send + Sync + Debug + 'static {
    /// Get provider information
    fn info(&self) -> Arc<ProviderInfo>;

    /// Chat completion (non-streaming)
    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn info(&self) -> Arc<ProviderInfo> {
        (**self).info()
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        (**self).chat_completion(req).await
    }
}
