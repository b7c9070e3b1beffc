//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur while reading or writing serialized views.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reference to an element or relationship the model does not contain.
    #[error("Unresolved {kind} reference: {id}")]
    UnresolvedReference { kind: &'static str, id: String },

    /// No format handles this file extension.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Structurally valid input that does not describe a valid view.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },
}

impl InterchangeError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create a YAML error.
    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Yaml(message.into())
    }

    /// Create an unresolved element reference error.
    pub fn unresolved_element(id: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            kind: "element",
            id: id.into(),
        }
    }

    /// Create an unresolved relationship reference error.
    pub fn unresolved_relationship(id: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            kind: "relationship",
            id: id.into(),
        }
    }

    /// Create an invalid view error.
    pub fn invalid_view(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "view",
            message: message.into(),
        }
    }
}
