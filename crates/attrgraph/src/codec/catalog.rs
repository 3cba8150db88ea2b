//! Attribute catalog queries and the stream field names derived from them.

use crate::error::{CodecError, Result};
use crate::graph::{AttributeDescriptor, AttributedGraph, Scope, ValueKind};

/// Field holding the vertex count.
pub const NUM_VERTICES: &str = "num_vertices";
/// Field holding the edge count.
pub const NUM_EDGES: &str = "num_edges";
/// Field holding the flat edge endpoint list.
pub const EDGES: &str = "edges";

/// Fail if the graph carries any whole-graph attribute.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedFeature`] naming the first such attribute.
pub fn ensure_no_graph_attributes<G: AttributedGraph + ?Sized>(graph: &G) -> Result<()> {
    match graph.attribute_descriptors(Scope::Graph).first() {
        None => Ok(()),
        Some(descriptor) => Err(CodecError::UnsupportedFeature {
            feature: format!(
                "graph attribute '{}': whole-graph attributes cannot be serialized",
                descriptor.name
            ),
        }),
    }
}

/// Declared attributes of the vertex or edge scope, in the graph's order.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedFeature`] if `scope` is [`Scope::Graph`]
/// or the graph has whole-graph attributes.
pub fn list_attributes<G: AttributedGraph + ?Sized>(
    graph: &G,
    scope: Scope,
) -> Result<Vec<AttributeDescriptor>> {
    if scope == Scope::Graph {
        return Err(CodecError::UnsupportedFeature {
            feature: "whole-graph attributes cannot be serialized".to_string(),
        });
    }
    ensure_no_graph_attributes(graph)?;
    Ok(graph.attribute_descriptors(scope))
}

/// Resolve a descriptor's tag to a persistable kind.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedAttributeType`] naming the attribute.
pub fn resolve_kind(scope: Scope, descriptor: &AttributeDescriptor) -> Result<ValueKind> {
    descriptor
        .tag
        .kind()
        .ok_or_else(|| CodecError::UnsupportedAttributeType {
            scope,
            name: descriptor.name.clone(),
            tag: descriptor.tag.0,
        })
}

/// Field holding the attribute names of a scope.
pub fn names_field(scope: Scope) -> &'static str {
    match scope {
        Scope::Graph => "graph_attr_names",
        Scope::Vertex => "vertex_attr_names",
        Scope::Edge => "edge_attr_names",
    }
}

/// Field holding the attribute type tags of a scope.
pub fn types_field(scope: Scope) -> &'static str {
    match scope {
        Scope::Graph => "graph_attr_types",
        Scope::Vertex => "vertex_attr_types",
        Scope::Edge => "edge_attr_types",
    }
}

/// Field holding one attribute's values.
///
/// The `:` separator keeps these apart from the names/types fields, so an
/// attribute called `names` cannot collide with `vertex_attr_names`.
pub fn values_field(scope: Scope, name: &str) -> String {
    format!("{scope}_attr:{name}")
}
