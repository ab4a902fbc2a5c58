//! # Itinera Providers
//!
//! Completion provider implementations.

pub mod openai;

// Re-exports
pub use openai::{OpenAiBuilder, OpenAiProvider};

use itinera_core::config::DEFAULT_API_BASE;
use itinera_core::error::AiError;

/// Create a Groq provider (OpenAI-compatible)
///
/// # Example
///
/// ```ignore
/// use itinera_provider::groq;
///
/// let provider = groq("your-api-key")?;
/// ```
pub fn groq(api_key: impl Into<String>) -> Result<OpenAiProvider, AiError> {
    OpenAiProvider::builder()
        .api_key(api_key)
        .api_base(DEFAULT_API_BASE)
        .build_with_id("groq", "Groq")
}

/// Create an OpenAI provider
pub fn openai(api_key: impl Into<String>) -> Result<OpenAiProvider, AiError> {
    OpenAiProvider::builder().api_key(api_key).build()
}
