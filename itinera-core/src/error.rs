//! Error types for itinerary requests.

use std::collections::BTreeSet;
use std::fmt;

/// Shape a schema field is required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedShape {
    /// A JSON string
    Text,
    /// A JSON array whose every element is a string
    SequenceOfText,
}

impl fmt::Display for ExpectedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedShape::Text => f.write_str("string"),
            ExpectedShape::SequenceOfText => f.write_str("list of strings"),
        }
    }
}

/// Category of an [`AiError`], for callers that only need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingCredential,
    Transport,
    MalformedResponse,
    SchemaViolation,
    TypeViolation,
    Configuration,
}

/// The main error type for itinerary operations.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Required API key is absent or empty
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    /// The remote completion call failed (network, auth rejection, service error)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response text is not a JSON object
    #[error("Model did not return a valid JSON object ({reason}). Got:\n{raw}")]
    MalformedResponse { raw: String, reason: String },

    /// Response object does not have exactly the required keys
    #[error("Schema keys mismatch. Missing={missing:?}, Extra={extra:?}")]
    SchemaViolation {
        missing: BTreeSet<String>,
        extra: BTreeSet<String>,
    },

    /// A field is present but has the wrong type
    #[error("{field} must be a {expected}")]
    TypeViolation {
        field: String,
        expected: ExpectedShape,
    },

    /// Invalid non-credential configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AiError {
    /// Create a missing credential error
    pub fn missing_credential(name: impl Into<String>) -> Self {
        Self::MissingCredential(name.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a malformed response error carrying the offending text
    pub fn malformed(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Create a type violation error
    pub fn type_violation(field: impl Into<String>, expected: ExpectedShape) -> Self {
        Self::TypeViolation {
            field: field.into(),
            expected,
        }
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Get the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AiError::MissingCredential(_) => ErrorKind::MissingCredential,
            AiError::Transport(_) => ErrorKind::Transport,
            AiError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            AiError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            AiError::TypeViolation { .. } => ErrorKind::TypeViolation,
            AiError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Check if this error came from validating the model's response
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedResponse | ErrorKind::SchemaViolation | ErrorKind::TypeViolation
        )
    }
}
