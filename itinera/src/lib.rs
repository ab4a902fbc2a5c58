//! # Itinera
//!
//! Validated travel itineraries from language models.
//!
//! Itinera asks an OpenAI-compatible completion service (Groq by default) for
//! a travel itinerary as JSON, then checks the reply strictly: it must be a
//! single JSON object with exactly the keys `destination`, `price_range`,
//! `ideal_visit_times` and `top_attractions`, each of the right type. Anything
//! else is reported as a categorized [`AiError`] and no itinerary is returned.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! itinera = "0.1"
//! ```
//!
//! ```ignore
//! // Reads GROQ_API_KEY from the environment.
//! let itinerary = itinera::get_itinerary("Lisbon").await?;
//! println!("{}", itinerary.top_attractions.join(", "));
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: `groq` and `layers`
//! - `groq`: Groq provider and the `get_itinerary*` helpers
//! - `openai`: OpenAI-compatible provider without the helpers
//! - `layers`: Built-in layers (logging)
//! - `schema`: `schemars::JsonSchema` for [`Itinerary`]
//! - `full`: All features enabled

// Re-export core types and traits
pub use itinera_core::*;

// Re-export providers under `provider` module
#[cfg(feature = "itinera-provider")]
pub mod provider {
    //! Completion provider implementations.
    pub use itinera_provider::*;
}

// Re-export layers under `layer` module
#[cfg(feature = "itinera-layer")]
pub mod layer {
    //! Built-in middleware layers.
    pub use itinera_layer::*;
}

// Re-export schemars when schema feature is enabled
#[cfg(feature = "schema")]
pub mod schemars {
    pub use ::schemars::*;
}

#[cfg(feature = "groq")]
mod client;

#[cfg(feature = "groq")]
pub use client::{executor_from_config, get_itinerary, get_itinerary_blocking, get_itinerary_with_config};

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude module containing the most commonly used types and traits.
    //!
    //! ```
    //! use itinera::prelude::*;
    //! ```

    pub use crate::{
        AiError, ClientConfig, ErrorKind, ExpectedShape, Itinerary, ItineraryExecutor, Layer,
        Provider, Result,
    };

    #[cfg(feature = "itinera-provider")]
    pub use crate::provider::*;

    #[cfg(feature = "itinera-layer")]
    pub use crate::layer::*;

    #[cfg(feature = "groq")]
    pub use crate::{get_itinerary, get_itinerary_blocking};
}
