//! Graph decoder.

use super::array::{decode_array, PREALLOC_LIMIT};
use super::catalog::{
    names_field, resolve_kind, types_field, values_field, EDGES, NUM_EDGES, NUM_VERTICES,
};
use super::stream::GraphSource;
use crate::error::{CodecError, Result};
use crate::graph::{AttributeDescriptor, AttributedGraphMut, Scope, TypeTag, VertexId};
use log::{debug, info};
use std::collections::HashSet;

/// Read a graph from `source` into a fresh `G::default()`.
///
/// See [`decode_into`].
pub fn decode<G, S>(source: &mut S) -> Result<G>
where
    G: AttributedGraphMut + Default,
    S: GraphSource + ?Sized,
{
    decode_into(source, G::default())
}

/// Read a graph from `source` into `graph`, which must be empty.
///
/// Fields are read in exactly the order [`encode`](super::encode) writes
/// them. The graph is taken by value and only handed back once the whole
/// stream has been consumed, so a failure never exposes a partially
/// populated graph.
///
/// # Errors
///
/// - [`CodecError::InvalidOperation`] if `graph` is not empty
/// - [`CodecError::CorruptStream`] if counts, lengths, names or endpoints are inconsistent
/// - [`CodecError::UnsupportedAttributeType`] for a tag that is neither Numeric nor Text
/// - [`CodecError::Io`] if the source fails
pub fn decode_into<G, S>(source: &mut S, mut graph: G) -> Result<G>
where
    G: AttributedGraphMut,
    S: GraphSource + ?Sized,
{
    if graph.vertex_count() != 0
        || graph.edge_count() != 0
        || !graph.attribute_descriptors(Scope::Vertex).is_empty()
        || !graph.attribute_descriptors(Scope::Edge).is_empty()
        || !graph.attribute_descriptors(Scope::Graph).is_empty()
    {
        return Err(CodecError::InvalidOperation {
            message: "decode target must be an empty graph".to_string(),
        });
    }

    let vertex_count = read_len(source, NUM_VERTICES)?;
    let edge_count = read_len(source, NUM_EDGES)?;
    info!("Decoding graph: {vertex_count} vertices, {edge_count} edges");

    let pairs = read_edges(source, vertex_count, edge_count)?;
    graph.add_vertices(vertex_count)?;
    graph.add_edges(&pairs)?;
    drop(pairs);

    read_scope(source, &mut graph, Scope::Vertex, vertex_count)?;
    read_scope(source, &mut graph, Scope::Edge, edge_count)?;

    source.finish()?;
    Ok(graph)
}

fn read_len<S: GraphSource + ?Sized>(source: &mut S, field: &str) -> Result<usize> {
    let count = source.read_count(field)?;
    usize::try_from(count)
        .map_err(|_| CodecError::corrupt(format!("{field} = {count} does not fit in memory")))
}

fn read_edges<S: GraphSource + ?Sized>(
    source: &mut S,
    vertex_count: usize,
    edge_count: usize,
) -> Result<Vec<(VertexId, VertexId)>> {
    let expected = edge_count
        .checked_mul(2)
        .ok_or_else(|| CodecError::corrupt(format!("edge count {edge_count} overflows")))?;
    let len = source.begin_array(EDGES)?;
    if len != expected as u64 {
        return Err(CodecError::corrupt(format!(
            "edge list has {len} endpoints, expected {expected}"
        )));
    }

    let mut pairs = Vec::with_capacity(edge_count.min(PREALLOC_LIMIT));
    for _ in 0..edge_count {
        let from = read_endpoint(source, vertex_count)?;
        let to = read_endpoint(source, vertex_count)?;
        pairs.push((from, to));
    }
    source.end_array()?;
    Ok(pairs)
}

fn read_endpoint<S: GraphSource + ?Sized>(source: &mut S, vertex_count: usize) -> Result<VertexId> {
    let raw = source.read_integer()?;
    match usize::try_from(raw) {
        Ok(vertex) if vertex < vertex_count => Ok(vertex),
        _ => Err(CodecError::corrupt(format!(
            "edge endpoint {raw} out of range for {vertex_count} vertices"
        ))),
    }
}

fn read_catalog<S: GraphSource + ?Sized>(
    source: &mut S,
    scope: Scope,
) -> Result<Vec<AttributeDescriptor>> {
    let name_count = source.begin_array(names_field(scope))?;
    let mut names = Vec::new();
    for _ in 0..name_count {
        names.push(source.read_text()?);
    }
    source.end_array()?;

    let tag_count = source.begin_array(types_field(scope))?;
    if tag_count != name_count {
        return Err(CodecError::corrupt(format!(
            "{scope} catalog has {name_count} names but {tag_count} types"
        )));
    }
    let mut tags = Vec::with_capacity(names.len());
    for _ in 0..tag_count {
        tags.push(TypeTag(source.read_integer()?));
    }
    source.end_array()?;

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(CodecError::corrupt(format!(
                "{scope} attribute '{name}' declared twice"
            )));
        }
    }

    Ok(names
        .into_iter()
        .zip(tags)
        .map(|(name, tag)| AttributeDescriptor::new(name, tag))
        .collect())
}

fn read_scope<G, S>(source: &mut S, graph: &mut G, scope: Scope, element_count: usize) -> Result<()>
where
    G: AttributedGraphMut,
    S: GraphSource + ?Sized,
{
    let descriptors = read_catalog(source, scope)?;
    let kinds = descriptors
        .iter()
        .map(|descriptor| resolve_kind(scope, descriptor))
        .collect::<Result<Vec<_>>>()?;

    for (descriptor, kind) in descriptors.iter().zip(kinds) {
        debug!("Decoding {scope} attribute '{}' ({kind})", descriptor.name);
        let values = decode_array(
            source,
            &values_field(scope, &descriptor.name),
            scope,
            descriptor,
            element_count,
        )?;
        graph.set_attribute_values(scope, &descriptor.name, kind, values)?;
    }
    Ok(())
}
