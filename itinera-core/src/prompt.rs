//! Prompt construction for itinerary requests.

use crate::schema::ITINERARY_FIELDS;
use crate::types::Message;

/// The two prompt segments sent for one itinerary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryPrompt {
    pub system: String,
    pub user: String,
}

impl ItineraryPrompt {
    /// Build the prompts for `destination`.
    ///
    /// The destination is interpolated verbatim; empty or odd values are
    /// passed through unchanged.
    pub fn new(destination: &str) -> Self {
        Self {
            system: system_prompt(),
            user: format!("Create the JSON travel itinerary for destination: {destination}"),
        }
    }

    /// Convert into a `[system, user]` message pair
    pub fn into_messages(self) -> Vec<Message> {
        vec![Message::system(self.system), Message::user(self.user)]
    }
}

/// Fixed system instruction listing the required keys and their shapes.
pub fn system_prompt() -> String {
    let mut prompt = String::from(
        "Return only valid JSON (no markdown, no extra text) with exactly these keys:\n{\n",
    );
    let last = ITINERARY_FIELDS.len() - 1;
    for (i, field) in ITINERARY_FIELDS.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        prompt.push_str(&format!(
            "    \"{}\": {}{}\n",
            field.name,
            field.shape.prompt_notation(),
            sep
        ));
    }
    prompt.push_str("}\n");
    prompt
}
