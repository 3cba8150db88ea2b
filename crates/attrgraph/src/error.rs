//! Error types for attrgraph operations.
//!
//! All fallible operations return [`Result<T>`]. Every error is fatal to the
//! enclosing encode or decode call; nothing is retried internally.

use crate::graph::Scope;
use thiserror::Error;

/// Result type alias for attrgraph operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for graph encoding, decoding and attribute operations.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The graph uses a feature the codec cannot persist (whole-graph attributes).
    #[error("Unsupported feature: {feature}")]
    UnsupportedFeature {
        /// Description of the unsupported feature
        feature: String,
    },

    /// An attribute's type tag is neither Numeric nor Text.
    #[error("Unsupported type tag {tag} for {scope} attribute '{name}'")]
    UnsupportedAttributeType {
        /// Scope the attribute belongs to
        scope: Scope,
        /// Attribute name
        name: String,
        /// Raw type tag
        tag: i64,
    },

    /// The stream contents are inconsistent with what was already read.
    #[error("Corrupt stream: {message}")]
    CorruptStream {
        /// What was inconsistent
        message: String,
    },

    /// Underlying sink/source failure (file I/O, JSON syntax, etc.)
    #[error("I/O error: {message}")]
    Io {
        /// Detailed error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vertex index outside `[0, vertex_count)`
    #[error("Vertex not found: {vertex_id}")]
    VertexNotFound {
        /// Index of the missing vertex
        vertex_id: usize,
    },

    /// Edge index outside `[0, edge_count)`
    #[error("Edge not found: {edge_id}")]
    EdgeNotFound {
        /// Index of the missing edge
        edge_id: usize,
    },

    /// No attribute with this name exists in the given scope.
    #[error("Attribute '{name}' not found on {scope}")]
    AttributeNotFound {
        /// Scope that was searched
        scope: Scope,
        /// Attribute name
        name: String,
    },

    /// A value of the wrong kind was written to or read from an attribute.
    #[error("Attribute type mismatch: expected {expected}, got {actual} for '{name}'")]
    AttributeTypeMismatch {
        /// Attribute name
        name: String,
        /// Expected kind
        expected: String,
        /// Actual kind found
        actual: String,
    },

    /// Invalid operation (e.g., decoding into a non-empty graph)
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong
        message: String,
    },
}

impl CodecError {
    /// Create an I/O error from a message and optional source.
    pub fn io<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a corrupt-stream error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptStream {
            message: message.into(),
        }
    }
}
