//! Graph encoder.

use super::array::encode_array;
use super::catalog::{
    ensure_no_graph_attributes, list_attributes, names_field, resolve_kind, types_field,
    values_field, EDGES, NUM_EDGES, NUM_VERTICES,
};
use super::stream::GraphSink;
use crate::error::{CodecError, Result};
use crate::graph::{AttributeDescriptor, AttributedGraph, Scope, ValueKind};
use log::{debug, info};

/// Write `graph` to `sink`.
///
/// Field order:
///
/// 1. `num_vertices`, `num_edges`
/// 2. `edges`: `2 * num_edges` endpoints in canonical edge order
/// 3. `vertex_attr_names`, `vertex_attr_types`, then `vertex_attr:<name>` per attribute
/// 4. `edge_attr_names`, `edge_attr_types`, then `edge_attr:<name>` per attribute
///
/// Both catalogs are checked before the first field is written: a graph that
/// cannot be encoded leaves the sink untouched. Attribute values are fetched
/// and written one attribute at a time.
///
/// # Errors
///
/// - [`CodecError::UnsupportedFeature`] if the graph has whole-graph attributes
/// - [`CodecError::UnsupportedAttributeType`] for an attribute that is neither Numeric nor Text
/// - [`CodecError::Io`] if the sink fails
pub fn encode<G, S>(graph: &G, sink: &mut S) -> Result<()>
where
    G: AttributedGraph + ?Sized,
    S: GraphSink + ?Sized,
{
    let vertex_count = graph.vertex_count();
    let edge_count = graph.edge_count();
    info!("Encoding graph: {vertex_count} vertices, {edge_count} edges");

    ensure_no_graph_attributes(graph)?;
    let vertex_attributes = plan_scope(graph, Scope::Vertex)?;
    let edge_attributes = plan_scope(graph, Scope::Edge)?;

    sink.write_count(NUM_VERTICES, vertex_count as u64)?;
    sink.write_count(NUM_EDGES, edge_count as u64)?;
    write_edges(graph, sink, edge_count)?;

    write_scope(graph, sink, Scope::Vertex, &vertex_attributes, vertex_count)?;
    write_scope(graph, sink, Scope::Edge, &edge_attributes, edge_count)?;

    sink.finish()?;
    debug!(
        "Encoded {} vertex and {} edge attributes",
        vertex_attributes.len(),
        edge_attributes.len()
    );
    Ok(())
}

/// Catalog of one scope with every tag already resolved.
fn plan_scope<G: AttributedGraph + ?Sized>(
    graph: &G,
    scope: Scope,
) -> Result<Vec<(AttributeDescriptor, ValueKind)>> {
    list_attributes(graph, scope)?
        .into_iter()
        .map(|descriptor| {
            let kind = resolve_kind(scope, &descriptor)?;
            Ok((descriptor, kind))
        })
        .collect()
}

fn write_edges<G, S>(graph: &G, sink: &mut S, edge_count: usize) -> Result<()>
where
    G: AttributedGraph + ?Sized,
    S: GraphSink + ?Sized,
{
    let edges = graph.edges();
    if edges.len() != edge_count {
        return Err(CodecError::InvalidOperation {
            message: format!(
                "graph reports {edge_count} edges but enumerates {}",
                edges.len()
            ),
        });
    }

    sink.begin_array(EDGES, 2 * edge_count as u64)?;
    for (source, target) in edges {
        sink.write_integer(endpoint(source)?)?;
        sink.write_integer(endpoint(target)?)?;
    }
    sink.end_array()
}

fn endpoint(vertex: usize) -> Result<i64> {
    i64::try_from(vertex).map_err(|_| CodecError::InvalidOperation {
        message: format!("vertex id {vertex} does not fit the stream's integer type"),
    })
}

fn write_scope<G, S>(
    graph: &G,
    sink: &mut S,
    scope: Scope,
    attributes: &[(AttributeDescriptor, ValueKind)],
    element_count: usize,
) -> Result<()>
where
    G: AttributedGraph + ?Sized,
    S: GraphSink + ?Sized,
{
    sink.begin_array(names_field(scope), attributes.len() as u64)?;
    for (descriptor, _) in attributes {
        sink.write_text(&descriptor.name)?;
    }
    sink.end_array()?;

    sink.begin_array(types_field(scope), attributes.len() as u64)?;
    for (descriptor, _) in attributes {
        sink.write_integer(descriptor.tag.0)?;
    }
    sink.end_array()?;

    for (descriptor, kind) in attributes {
        debug!("Encoding {scope} attribute '{}' ({kind})", descriptor.name);
        let values = graph.attribute_values(scope, &descriptor.name)?;
        if values.len() != element_count {
            return Err(CodecError::InvalidOperation {
                message: format!(
                    "{scope} attribute '{}' has {} values for {element_count} elements",
                    descriptor.name,
                    values.len()
                ),
            });
        }
        encode_array(sink, &values_field(scope, &descriptor.name), *kind, &values)?;
    }
    Ok(())
}
