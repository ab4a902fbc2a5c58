//! # Itinera Layers
//!
//! Built-in layers for Itinera.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs all provider operations with timing information
//!
//! ## Usage
//!
//! ```ignore
//! use itinera_core::ItineraryExecutor;
//! use itinera_layer::LoggingLayer;
//!
//! let executor = ItineraryExecutor::builder(provider)
//!     .layer(LoggingLayer::new())
//!     .finish();
//! ```

pub mod logging;

// Re-exports
pub use logging::{LoggingLayer, LoggingProvider};
