//! Ready-made Groq client wiring.

use crate::layer::LoggingLayer;
use crate::provider::OpenAiProvider;
use itinera_core::{AiError, ClientConfig, Itinerary, ItineraryExecutor, Result};

/// Build an executor for `config`: Groq provider, logging layer, and the
/// configured model and decoding options.
pub fn executor_from_config(config: &ClientConfig) -> Result<ItineraryExecutor> {
    let provider = OpenAiProvider::from_config(config)?;

    Ok(ItineraryExecutor::builder(provider)
        .layer(LoggingLayer::new())
        .model(config.model.clone())
        .temperature(config.temperature)
        .max_tokens(config.max_tokens)
        .finish())
}

/// Request a validated itinerary for `destination`.
///
/// The credential is read from `GROQ_API_KEY` on every call; when it is
/// missing this fails with `MissingCredential` before anything is sent.
pub async fn get_itinerary(destination: &str) -> Result<Itinerary> {
    let config = ClientConfig::from_env()?;
    get_itinerary_with_config(&config, destination).await
}

/// Request a validated itinerary using an explicit config.
pub async fn get_itinerary_with_config(
    config: &ClientConfig,
    destination: &str,
) -> Result<Itinerary> {
    executor_from_config(config)?
        .get_itinerary(destination)
        .await
}

/// Blocking variant of [`get_itinerary`].
///
/// Runs the request on a fresh current-thread runtime, so it must not be
/// called from inside an async context.
pub fn get_itinerary_blocking(destination: &str) -> Result<Itinerary> {
    let config = ClientConfig::from_env()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AiError::configuration(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(get_itinerary_with_config(&config, destination))
}
