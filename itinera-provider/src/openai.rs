//! OpenAI-compatible provider implementation using the async-openai crate.
//!
//! Groq, OpenAI and DeepSeek all speak the same chat-completions protocol, so
//! one provider type covers them; only the base URL and provider ID differ.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    CreateChatCompletionResponse, ResponseFormat as OpenAIResponseFormat,
    ResponseFormatJsonSchema as OpenAIResponseFormatJsonSchema,
};
use async_openai::Client;
use async_trait::async_trait;
use itinera_core::config::{ClientConfig, API_KEY_ENV};
use itinera_core::error::AiError;
use itinera_core::provider::Provider;
use itinera_core::types::*;
use std::sync::Arc;

/// OpenAI-compatible provider
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    info: Arc<ProviderInfo>,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("info", &self.info)
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a builder for more configuration options
    pub fn builder() -> OpenAiBuilder {
        OpenAiBuilder::default()
    }

    /// Create a provider from a [`ClientConfig`], identified as Groq.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AiError> {
        Self::builder()
            .api_key(config.api_key.clone())
            .api_base(config.api_base.clone())
            .build_with_id("groq", "Groq")
    }

    fn convert_message(msg: &Message) -> Result<ChatCompletionRequestMessage, AiError> {
        let content = msg.content.clone();

        match msg.role {
            Role::System => {
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        AiError::configuration(format!("Failed to build system message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::System(msg))
            }
            Role::User => {
                let msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        AiError::configuration(format!("Failed to build user message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::User(msg))
            }
            Role::Assistant => {
                let msg = ChatCompletionRequestAssistantMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        AiError::configuration(format!("Failed to build assistant message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::Assistant(msg))
            }
        }
    }

    fn convert_response_format(format: &ResponseFormat) -> OpenAIResponseFormat {
        match format {
            ResponseFormat::Text => OpenAIResponseFormat::Text,
            ResponseFormat::JsonObject => OpenAIResponseFormat::JsonObject,
            ResponseFormat::JsonSchema {
                name,
                schema,
                strict,
            } => OpenAIResponseFormat::JsonSchema {
                json_schema: OpenAIResponseFormatJsonSchema {
                    name: name.clone(),
                    schema: Some(schema.clone()),
                    strict: Some(*strict),
                    description: None,
                },
            },
        }
    }

    fn build_request(req: &ChatCompletionRequest) -> Result<CreateChatCompletionRequest, AiError> {
        let messages = req
            .messages
            .iter()
            .map(Self::convert_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&req.model).messages(messages);

        if let Some(max_tokens) = req.max_tokens {
            builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = req.temperature {
            builder.temperature(temperature);
        }
        if let Some(response_format) = &req.response_format {
            builder.response_format(Self::convert_response_format(response_format));
        }

        builder
            .build()
            .map_err(|e| AiError::configuration(format!("Failed to build request: {}", e)))
    }

    fn convert_response(response: CreateChatCompletionResponse) -> ChatCompletionResponse {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| {
                let finish_reason = choice
                    .finish_reason
                    .map_or(FinishReason::Stop, |r| match r {
                        async_openai::types::FinishReason::Stop => FinishReason::Stop,
                        async_openai::types::FinishReason::Length => FinishReason::Length,
                        async_openai::types::FinishReason::ContentFilter => {
                            FinishReason::ContentFilter
                        }
                        other => FinishReason::Other(format!("{:?}", other)),
                    });

                Choice {
                    index: choice.index,
                    message: Message::assistant(choice.message.content.unwrap_or_default()),
                    finish_reason,
                }
            })
            .collect();

        let usage = response.usage.map_or(Usage::default(), |u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
            created: Some(response.created as u64),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        let openai_req = Self::build_request(&req)?;
        tracing::trace!(provider = %self.info.id, model = %req.model, "sending chat completion");

        let response = self
            .client
            .chat()
            .create(openai_req)
            .await
            .map_err(|e| AiError::transport(format!("{} API error: {}", self.info.name, e)))?;

        Ok(Self::convert_response(response))
    }
}

/// Builder for OpenAI-compatible providers
#[derive(Default)]
pub struct OpenAiBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
}

impl OpenAiBuilder {
    /// Set API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set API base URL (for OpenAI-compatible APIs like Groq)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Build the provider, identified as OpenAI
    pub fn build(self) -> Result<OpenAiProvider, AiError> {
        self.build_with_id("openai", "OpenAI")
    }

    /// Build a provider with a custom provider ID and name
    ///
    /// The ID selects the JSON output strategy, so OpenAI-compatible services
    /// should pass their own (`"groq"`, `"deepseek"`).
    ///
    /// Fails with `MissingCredential` before any network use when no key, or
    /// an empty one, was given.
    pub fn build_with_id(
        self,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Result<OpenAiProvider, AiError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AiError::missing_credential(API_KEY_ENV))?;

        let mut config = OpenAIConfig::new().with_api_key(api_key);

        if let Some(api_base) = self.api_base {
            config = config.with_api_base(api_base);
        }

        Ok(OpenAiProvider {
            client: Client::with_config(config),
            info: Arc::new(ProviderInfo {
                id: provider_id.into(),
                name: provider_name.into(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::error::ErrorKind;
    use itinera_core::schema::itinerary_json_schema;

    #[test]
    fn test_build_without_key_is_missing_credential() {
        let err = OpenAiProvider::builder().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);

        let err = OpenAiProvider::builder().api_key("").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[test]
    fn test_from_config_identifies_as_groq() {
        let provider = OpenAiProvider::from_config(&ClientConfig::new("gsk_test")).unwrap();

        assert_eq!(provider.info().id, "groq");
        assert!(!format!("{:?}", provider).contains("gsk_test"));
    }

    #[test]
    fn test_build_request_maps_messages_and_options() {
        let req = ChatCompletionRequest::new(
            "llama-3.3-70b-versatile",
            vec![Message::system("sys"), Message::user("usr")],
        )
        .with_temperature(0.3)
        .with_max_tokens(256)
        .with_response_format(ResponseFormat::JsonObject);

        let openai_req = OpenAiProvider::build_request(&req).unwrap();

        assert_eq!(openai_req.model, "llama-3.3-70b-versatile");
        assert_eq!(openai_req.messages.len(), 2);
        assert!(matches!(
            openai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            openai_req.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
        assert_eq!(openai_req.temperature, Some(0.3));
        assert!(matches!(
            openai_req.response_format,
            Some(OpenAIResponseFormat::JsonObject)
        ));
    }

    #[test]
    fn test_convert_json_schema_format() {
        let format = ResponseFormat::JsonSchema {
            name: "itinerary".to_string(),
            schema: itinerary_json_schema(),
            strict: true,
        };

        match OpenAiProvider::convert_response_format(&format) {
            OpenAIResponseFormat::JsonSchema { json_schema } => {
                assert_eq!(json_schema.name, "itinerary");
                assert_eq!(json_schema.strict, Some(true));
                assert_eq!(json_schema.schema, Some(itinerary_json_schema()));
            }
            _ => panic!("Expected JsonSchema response format"),
        }
    }

    #[test]
    fn test_convert_response() {
        let response: CreateChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-42",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "llama-3.3-70b-versatile",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "{\"destination\":\"Oslo\"}" },
                "finish_reason": "length"
            }],
            "usage": { "prompt_tokens": 40, "completion_tokens": 8, "total_tokens": 48 }
        }))
        .unwrap();

        let converted = OpenAiProvider::convert_response(response);

        assert_eq!(converted.id, "chatcmpl-42");
        assert_eq!(converted.first_text(), Some("{\"destination\":\"Oslo\"}"));
        assert_eq!(converted.choices[0].finish_reason, FinishReason::Length);
        assert_eq!(converted.usage.total_tokens, 48);
    }
}
