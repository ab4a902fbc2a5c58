//! # Itinera Core
//!
//! Core abstractions for requesting travel itineraries from a language model.
//!
//! The crate holds the itinerary record and its schema, the prompt builder,
//! the response validator, and the provider/layer traits the executor runs
//! requests through. Validation is usable on its own:
//!
//! ```
//! let raw = r#"{"destination":"Paris","price_range":"$$",
//!     "ideal_visit_times":["Spring"],"top_attractions":["Louvre"]}"#;
//! let itinerary = itinera_core::validate(raw).unwrap();
//! assert_eq!(itinerary.top_attractions, vec!["Louvre"]);
//! ```

pub mod config;
pub mod error;
pub mod layer;
pub mod prompt;
pub mod provider;
pub mod runtime;
pub mod schema;
pub mod strategy;
pub mod types;
pub mod validate;

// Re-exports
pub use config::ClientConfig;
pub use error::{AiError, ErrorKind, ExpectedShape};
pub use layer::{Layer, LayeredProvider};
pub use prompt::ItineraryPrompt;
pub use provider::Provider;
pub use runtime::ItineraryExecutor;
pub use strategy::{JsonModeStrategy, JsonOutputStrategy, JsonSchemaStrategy, PromptOnlyStrategy};
pub use types::*;
pub use validate::{validate, validate_value};

/// Result type alias for itinerary operations
pub type Result<T> = std::result::Result<T, AiError>;
