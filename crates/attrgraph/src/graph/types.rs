//! Core graph types: ids, attribute scopes and descriptors.

use super::value::TypeTag;
use serde::{Deserialize, Serialize};

/// Dense zero-based vertex index.
pub type VertexId = usize;

/// Edge index, equal to the edge's insertion position.
pub type EdgeId = usize;

/// Which table an attribute lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Whole-graph attributes (one value per graph)
    Graph,
    /// One value per vertex
    Vertex,
    /// One value per edge
    Edge,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Graph => write!(f, "graph"),
            Scope::Vertex => write!(f, "vertex"),
            Scope::Edge => write!(f, "edge"),
        }
    }
}

/// Name and type tag of one declared attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute name, unique within its scope
    pub name: String,
    /// Type tag shared by every value of the attribute
    pub tag: TypeTag,
}

impl AttributeDescriptor {
    /// Create a new descriptor.
    pub fn new(name: impl Into<String>, tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            tag,
        }
    }
}
