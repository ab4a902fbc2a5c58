//! Runtime layer for Itinera.
//!
//! The runtime sits between the high-level `get_itinerary` API and the
//! low-level provider interface. It builds the prompts, picks the JSON output
//! strategy for the provider, runs the wrapped provider and validates the
//! reply.

pub mod executor;

pub use executor::{ItineraryExecutor, ItineraryExecutorBuilder};
