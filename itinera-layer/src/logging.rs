//! Logging layer for provider operations.

use async_trait::async_trait;
use itinera_core::error::AiError;
use itinera_core::impl_layered_provider;
use itinera_core::layer::{Layer, LayeredProvider};
use itinera_core::provider::Provider;
use itinera_core::types::*;

/// Logging layer that logs provider operations.
#[derive(Debug, Clone)]
pub struct LoggingLayer {
    prefix: String,
}

impl LoggingLayer {
    /// Create a new logging layer
    pub fn new() -> Self {
        Self {
            prefix: "[Itinera]".to_string(),
        }
    }

    /// Create a logging layer with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Provider> Layer<P> for LoggingLayer {
    type LayeredProvider = LoggingProvider<P>;

    fn layer(&self, inner: P) -> Self::LayeredProvider {
        LoggingProvider {
            inner,
            prefix: self.prefix.clone(),
        }
    }
}

/// Provider wrapped with logging
#[derive(Debug)]
pub struct LoggingProvider<P> {
    inner: P,
    prefix: String,
}

#[async_trait]
impl<P: Provider> LayeredProvider for LoggingProvider<P> {
    type Inner = P;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        let model = req.model.clone();
        tracing::debug!(
            prefix = %self.prefix,
            model = %model,
            messages = req.messages.len(),
            "sending itinerary completion"
        );

        let start = std::time::Instant::now();
        let result = self.inner.chat_completion(req).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::debug!(
                prefix = %self.prefix,
                model = %model,
                response_id = %response.id,
                prompt_tokens = response.usage.prompt_tokens,
                completion_tokens = response.usage.completion_tokens,
                elapsed_ms,
                "itinerary completion received"
            ),
            Err(err) => tracing::error!(
                prefix = %self.prefix,
                model = %model,
                kind = ?err.kind(),
                error = %err,
                elapsed_ms,
                "itinerary completion failed"
            ),
        }

        result
    }
}

impl_layered_provider!(LoggingProvider);
