//! Request a travel itinerary from Groq and print it as JSON.
//!
//! ```sh
//! GROQ_API_KEY=... cargo run --example itinerary -- "Kyoto"
//! ```
//!
//! Set `ITINERA_MODEL` to try another model.

use itinera::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let destination = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Paris".to_string());

    match get_itinerary_blocking(&destination) {
        Ok(itinerary) => {
            println!("{}", serde_json::to_string_pretty(&itinerary)?);
            Ok(())
        }
        Err(AiError::SchemaViolation { missing, extra }) => {
            anyhow::bail!("model reply had the wrong keys: missing={missing:?}, extra={extra:?}")
        }
        Err(e) => Err(e.into()),
    }
}
