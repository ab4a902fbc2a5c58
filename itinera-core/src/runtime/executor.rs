//! ItineraryExecutor implementation.
//!
//! The executor drives one request through prompt construction, the provider's
//! chat completion and response validation.

use crate::config::DEFAULT_MODEL;
use crate::error::AiError;
use crate::layer::Layer;
use crate::prompt::ItineraryPrompt;
use crate::provider::Provider;
use crate::strategy::{detect_json_strategy, JsonOutputStrategy};
use crate::types::*;
use crate::validate::validate;
use std::sync::Arc;
use tracing::Instrument;

/// Type-erased provider that can be shared across threads
type BoxedProvider = Arc<dyn Provider>;

/// Builder for composing a provider with layers and request options.
///
/// # Example
///
/// ```ignore
/// let executor = ItineraryExecutor::builder(groq_provider)
///     .layer(LoggingLayer::new())
///     .model("llama-3.3-70b-versatile")
///     .finish();
/// ```
pub struct ItineraryExecutorBuilder<P> {
    provider: P,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    json_strategy: Option<Box<dyn JsonOutputStrategy>>,
}

impl<P: Provider> ItineraryExecutorBuilder<P> {
    /// Create a new builder with a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
            json_strategy: None,
        }
    }

    /// Add a layer to wrap the provider
    pub fn layer<L>(self, layer: L) -> ItineraryExecutorBuilder<L::LayeredProvider>
    where
        L: Layer<P>,
    {
        ItineraryExecutorBuilder {
            provider: layer.layer(self.provider),
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_strategy: self.json_strategy,
        }
    }

    /// Set the model name sent with every request
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set sampling temperature
    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set a custom JSON output strategy
    ///
    /// If not set, the strategy will be auto-detected based on the provider ID.
    pub fn json_strategy(mut self, strategy: Box<dyn JsonOutputStrategy>) -> Self {
        self.json_strategy = Some(strategy);
        self
    }

    /// Finish building and create an ItineraryExecutor
    pub fn finish(self) -> ItineraryExecutor {
        let provider = Arc::new(self.provider);
        let provider_id = provider.info().id.clone();

        let json_strategy = self
            .json_strategy
            .unwrap_or_else(|| detect_json_strategy(&provider_id));

        ItineraryExecutor {
            provider,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_strategy,
        }
    }
}

/// Runs itinerary requests against a provider.
pub struct ItineraryExecutor {
    provider: BoxedProvider,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    json_strategy: Box<dyn JsonOutputStrategy>,
}

impl ItineraryExecutor {
    /// Create a new builder
    pub fn builder<P: Provider>(provider: P) -> ItineraryExecutorBuilder<P> {
        ItineraryExecutorBuilder::new(provider)
    }

    /// Get provider information
    pub fn info(&self) -> Arc<ProviderInfo> {
        self.provider.info()
    }

    /// Model name sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a system and a user prompt, returning the raw reply text.
    ///
    /// Provider errors are returned unchanged.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, AiError> {
        let mut req = ChatCompletionRequest::new(
            self.model.clone(),
            vec![Message::system(system), Message::user(user)],
        );
        req.temperature = self.temperature;
        req.max_tokens = self.max_tokens;

        self.json_strategy.apply(&mut req)?;

        let response = self.provider.chat_completion(req).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::transport("No choices in response"))?;

        if choice.finish_reason == FinishReason::Length {
            tracing::warn!(
                model = %response.model,
                completion_tokens = response.usage.completion_tokens,
                "completion stopped at the token limit, reply is likely truncated"
            );
        }

        Ok(choice.message.content)
    }

    /// Request and validate an itinerary for `destination`.
    pub async fn get_itinerary(&self, destination: &str) -> Result<Itinerary, AiError> {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            "itinerary",
            %request_id,
            destination,
            provider = %self.provider.info().id
        );

        self.run(destination).instrument(span).await
    }

    async fn run(&self, destination: &str) -> Result<Itinerary, AiError> {
        let result = self.complete_and_validate(destination).await;

        match &result {
            Ok(itinerary) => tracing::debug!(
                attractions = itinerary.top_attractions.len(),
                "itinerary validated"
            ),
            Err(err) if err.is_validation() => {
                tracing::debug!(kind = ?err.kind(), "response failed validation")
            }
            Err(err) => tracing::debug!(kind = ?err.kind(), error = %err, "completion failed"),
        }

        result
    }

    async fn complete_and_validate(&self, destination: &str) -> Result<Itinerary, AiError> {
        let prompt = ItineraryPrompt::new(destination);
        let raw = self.complete(&prompt.system, &prompt.user).await?;
        validate(&raw)
    }
}
