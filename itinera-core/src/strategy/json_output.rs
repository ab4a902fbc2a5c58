//! JSON output strategies for different providers.
//!
//! A strategy only decides which `response_format` hint accompanies the
//! request. The response is validated the same way whatever the hint was.
//! - PromptOnlyStrategy: no hint, the system prompt alone asks for JSON
//! - JsonModeStrategy: basic JSON object mode (Groq, DeepSeek)
//! - JsonSchemaStrategy: strict JSON Schema (OpenAI)

use crate::error::AiError;
use crate::schema::itinerary_json_schema;
use crate::types::{ChatCompletionRequest, ResponseFormat};

/// Strategy for requesting JSON output from a provider.
pub trait JsonOutputStrategy: Send + Sync {
    /// Get the strategy name for debugging
    fn name(&self) -> &str;

    /// Apply this strategy to a chat completion request.
    fn apply(&self, req: &mut ChatCompletionRequest) -> Result<(), AiError>;
}

/// Leaves the request untouched.
#[derive(Debug, Clone, Default)]
pub struct PromptOnlyStrategy;

impl JsonOutputStrategy for PromptOnlyStrategy {
    fn name(&self) -> &str {
        "PromptOnlyStrategy"
    }

    fn apply(&self, req: &mut ChatCompletionRequest) -> Result<(), AiError> {
        req.response_format = None;
        Ok(())
    }
}

/// Requests a JSON object without a schema.
#[derive(Debug, Clone, Default)]
pub struct JsonModeStrategy;

impl JsonOutputStrategy for JsonModeStrategy {
    fn name(&self) -> &str {
        "JsonModeStrategy"
    }

    fn apply(&self, req: &mut ChatCompletionRequest) -> Result<(), AiError> {
        req.response_format = Some(ResponseFormat::JsonObject);
        Ok(())
    }
}

/// Requests output conforming to the itinerary JSON Schema.
#[derive(Debug, Clone)]
pub struct JsonSchemaStrategy {
    /// Whether to enable strict mode
    pub strict: bool,
}

impl JsonSchemaStrategy {
    /// Create a new JSON Schema strategy with strict mode enabled
    pub fn new() -> Self {
        Self { strict: true }
    }

    /// Create a new JSON Schema strategy with configurable strict mode
    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }
}

impl Default for JsonSchemaStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonOutputStrategy for JsonSchemaStrategy {
    fn name(&self) -> &str {
        "JsonSchemaStrategy"
    }

    fn apply(&self, req: &mut ChatCompletionRequest) -> Result<(), AiError> {
        req.response_format = Some(ResponseFormat::JsonSchema {
            name: "itinerary".to_string(),
            schema: itinerary_json_schema(),
            strict: self.strict,
        });
        Ok(())
    }
}

/// Pick the JSON output strategy for a provider ID.
pub fn detect_json_strategy(provider_id: &str) -> Box<dyn JsonOutputStrategy> {
    match provider_id {
        "openai" => Box::new(JsonSchemaStrategy::new()),
        "groq" | "deepseek" => Box::new(JsonModeStrategy),
        _ => Box::new(PromptOnlyStrategy),
    }
}
