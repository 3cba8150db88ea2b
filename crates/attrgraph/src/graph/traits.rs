//! Capabilities the codec needs from a graph.
//!
//! The codec never touches a concrete graph type. Anything that can report
//! its topology and attribute tables through [`AttributedGraph`] can be
//! encoded, and anything that implements [`AttributedGraphMut`] can be the
//! target of a decode.

use super::types::{AttributeDescriptor, Scope, VertexId};
use super::value::{TypedValue, ValueKind};
use crate::error::Result;

/// Read access to an attributed graph.
pub trait AttributedGraph {
    /// Number of vertices; vertex ids are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// All edges as `(source, target)` pairs in canonical order.
    ///
    /// The order must be deterministic and must match the order in which
    /// edges were inserted, since edge attributes are aligned to it by
    /// position.
    fn edges(&self) -> Vec<(VertexId, VertexId)>;

    /// Declared attributes of `scope`, in a stable order.
    fn attribute_descriptors(&self, scope: Scope) -> Vec<AttributeDescriptor>;

    /// Every value of one attribute, aligned with vertex ids or canonical
    /// edge order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AttributeNotFound`](crate::CodecError::AttributeNotFound)
    /// if the attribute does not exist and
    /// [`CodecError::UnsupportedAttributeType`](crate::CodecError::UnsupportedAttributeType)
    /// if its values cannot be expressed as [`TypedValue`]s.
    fn attribute_values(&self, scope: Scope, name: &str) -> Result<Vec<TypedValue>>;
}

/// Bulk mutation used to rebuild a graph from a stream.
///
/// # Ordering contract
///
/// After `add_edges(pairs)` on a graph with no edges, [`AttributedGraph::edges`]
/// must return exactly `pairs`, in the same order. The decoder relies on this
/// to line edge attributes up with the edges they were read for.
pub trait AttributedGraphMut: AttributedGraph {
    /// Append `count` vertices with default attribute values.
    fn add_vertices(&mut self, count: usize) -> Result<()>;

    /// Append edges in slice order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::VertexNotFound`](crate::CodecError::VertexNotFound)
    /// if an endpoint does not exist.
    fn add_edges(&mut self, pairs: &[(VertexId, VertexId)]) -> Result<()>;

    /// Replace every value of one attribute, creating it if needed.
    ///
    /// `values` must hold one entry per element of `scope`, all of `kind`.
    /// The kind is passed separately so that attributes of empty scopes keep
    /// their type.
    fn set_attribute_values(
        &mut self,
        scope: Scope,
        name: &str,
        kind: ValueKind,
        values: Vec<TypedValue>,
    ) -> Result<()>;
}
