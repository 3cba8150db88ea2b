//! In-memory attributed graph.

use super::traits::{AttributedGraph, AttributedGraphMut};
use super::types::{AttributeDescriptor, EdgeId, Scope, VertexId};
use super::value::{TypeTag, TypedValue, ValueKind};
use crate::error::{CodecError, Result};
use log::{debug, trace};
use std::ops::Range;

/// Values of one attribute, one slot per element.
#[derive(Debug, Clone, PartialEq)]
enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
    Boolean(Vec<bool>),
}

impl Column {
    fn filled(kind: ValueKind, len: usize) -> Self {
        match kind {
            ValueKind::Numeric => Column::Numeric(vec![f64::NAN; len]),
            ValueKind::Text => Column::Text(vec![String::new(); len]),
        }
    }

    fn tag(&self) -> TypeTag {
        match self {
            Column::Numeric(_) => TypeTag::NUMERIC,
            Column::Text(_) => TypeTag::TEXT,
            Column::Boolean(_) => TypeTag::BOOLEAN,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "Numeric",
            Column::Text(_) => "Text",
            Column::Boolean(_) => "Boolean",
        }
    }

    fn resize(&mut self, len: usize) {
        match self {
            Column::Numeric(v) => v.resize(len, f64::NAN),
            Column::Text(v) => v.resize(len, String::new()),
            Column::Boolean(v) => v.resize(len, false),
        }
    }

    fn get(&self, index: usize) -> Option<TypedValue> {
        match self {
            Column::Numeric(v) => v.get(index).map(|n| TypedValue::Numeric(*n)),
            Column::Text(v) => v.get(index).map(|s| TypedValue::Text(s.clone())),
            Column::Boolean(_) => None,
        }
    }

    fn set(&mut self, name: &str, index: usize, value: TypedValue) -> Result<()> {
        match (self, value) {
            (Column::Numeric(v), TypedValue::Numeric(n)) => v[index] = n,
            (Column::Text(v), TypedValue::Text(s)) => v[index] = s,
            (column, value) => {
                return Err(CodecError::AttributeTypeMismatch {
                    name: name.to_string(),
                    expected: column.type_name().to_string(),
                    actual: value.kind().to_string(),
                })
            }
        }
        Ok(())
    }
}

/// Attribute columns of one scope, kept in creation order.
#[derive(Debug, Clone, Default)]
struct AttributeTable {
    columns: Vec<(String, Column)>,
}

impl AttributeTable {
    fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, column)| column)
    }

    /// Column for `name`, created with defaults for `len` elements if missing.
    fn column_or_insert(&mut self, name: &str, template: Column, len: usize) -> &mut Column {
        let index = match self.columns.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                let mut column = template;
                column.resize(len);
                self.columns.push((name.to_string(), column));
                self.columns.len() - 1
            }
        };
        &mut self.columns[index].1
    }

    fn replace(&mut self, name: &str, column: Column) {
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name.to_string(), column)),
        }
    }

    fn remove(&mut self, name: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|(n, _)| n != name);
        self.columns.len() != before
    }

    fn resize(&mut self, len: usize) {
        for (_, column) in &mut self.columns {
            column.resize(len);
        }
    }

    fn descriptors(&self) -> Vec<AttributeDescriptor> {
        self.columns
            .iter()
            .map(|(name, column)| AttributeDescriptor::new(name.clone(), column.tag()))
            .collect()
    }
}

/// An in-memory graph with per-vertex, per-edge and whole-graph attributes.
///
/// Vertices are dense indices. Edges are stored in insertion order, which is
/// also their [`EdgeId`] and their canonical enumeration order. Attributes
/// cover every element of their scope; elements that were never assigned a
/// value read back as the kind's default (`NaN`, `""` or `false`).
#[derive(Debug, Clone, Default)]
pub struct AttributeGraph {
    directed: bool,
    vertex_count: usize,
    edges: Vec<(VertexId, VertexId)>,
    graph_attributes: AttributeTable,
    vertex_attributes: AttributeTable,
    edge_attributes: AttributeTable,
}

impl AttributeGraph {
    /// Create an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Whether edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph has no vertices and no edges.
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0 && self.edges.is_empty()
    }

    /// Add a single vertex and return its id.
    pub fn add_vertex(&mut self) -> VertexId {
        self.add_vertices(1).start
    }

    /// Add `count` vertices and return their id range.
    pub fn add_vertices(&mut self, count: usize) -> Range<VertexId> {
        let start = self.vertex_count;
        self.vertex_count += count;
        self.vertex_attributes.resize(self.vertex_count);
        debug!("Added {count} vertices (total {})", self.vertex_count);
        start..self.vertex_count
    }

    /// Add an edge between two existing vertices.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::VertexNotFound`] if either endpoint doesn't exist.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> Result<EdgeId> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        let edge_id = self.edges.len();
        self.edges.push((source, target));
        self.edge_attributes.resize(self.edges.len());
        trace!("Edge {edge_id} added: {source} -> {target}");
        Ok(edge_id)
    }

    /// Add edges in slice order and return their id range.
    ///
    /// All endpoints are validated before any edge is inserted.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::VertexNotFound`] if any endpoint doesn't exist.
    pub fn add_edges(&mut self, pairs: &[(VertexId, VertexId)]) -> Result<Range<EdgeId>> {
        for &(source, target) in pairs {
            self.check_vertex(source)?;
            self.check_vertex(target)?;
        }
        let start = self.edges.len();
        self.edges.extend_from_slice(pairs);
        self.edge_attributes.resize(self.edges.len());
        debug!("Added {} edges (total {})", pairs.len(), self.edges.len());
        Ok(start..self.edges.len())
    }

    /// Get the endpoints of an edge.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EdgeNotFound`] if the edge doesn't exist.
    pub fn edge(&self, id: EdgeId) -> Result<(VertexId, VertexId)> {
        self.edges
            .get(id)
            .copied()
            .ok_or(CodecError::EdgeNotFound { edge_id: id })
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// Set one vertex's value of a numeric or text attribute.
    ///
    /// The attribute is created on first use; other vertices get the default.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::VertexNotFound`] for a bad id and
    /// [`CodecError::AttributeTypeMismatch`] if the attribute already holds
    /// another kind.
    pub fn set_vertex_attribute(
        &mut self,
        name: &str,
        vertex: VertexId,
        value: impl Into<TypedValue>,
    ) -> Result<()> {
        self.check_vertex(vertex)?;
        let value = value.into();
        trace!("Setting vertex attribute '{name}' on {vertex}");
        let len = self.vertex_count;
        self.vertex_attributes
            .column_or_insert(name, Column::filled(value.kind(), 0), len)
            .set(name, vertex, value)
    }

    /// Set one edge's value of a numeric or text attribute.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EdgeNotFound`] for a bad id and
    /// [`CodecError::AttributeTypeMismatch`] if the attribute already holds
    /// another kind.
    pub fn set_edge_attribute(
        &mut self,
        name: &str,
        edge: EdgeId,
        value: impl Into<TypedValue>,
    ) -> Result<()> {
        self.check_edge(edge)?;
        let value = value.into();
        trace!("Setting edge attribute '{name}' on {edge}");
        let len = self.edges.len();
        self.edge_attributes
            .column_or_insert(name, Column::filled(value.kind(), 0), len)
            .set(name, edge, value)
    }

    /// Set one vertex's value of a boolean attribute.
    ///
    /// Boolean attributes can be stored but not encoded.
    pub fn set_vertex_boolean(&mut self, name: &str, vertex: VertexId, value: bool) -> Result<()> {
        self.check_vertex(vertex)?;
        let len = self.vertex_count;
        let column = self
            .vertex_attributes
            .column_or_insert(name, Column::Boolean(Vec::new()), len);
        set_boolean(column, name, vertex, value)
    }

    /// Set one edge's value of a boolean attribute.
    pub fn set_edge_boolean(&mut self, name: &str, edge: EdgeId, value: bool) -> Result<()> {
        self.check_edge(edge)?;
        let len = self.edges.len();
        let column = self
            .edge_attributes
            .column_or_insert(name, Column::Boolean(Vec::new()), len);
        set_boolean(column, name, edge, value)
    }

    /// Set a whole-graph attribute.
    ///
    /// Graphs carrying whole-graph attributes cannot be encoded.
    pub fn set_graph_attribute(&mut self, name: &str, value: impl Into<TypedValue>) -> Result<()> {
        let value = value.into();
        self.graph_attributes
            .column_or_insert(name, Column::filled(value.kind(), 0), 1)
            .set(name, 0, value)
    }

    /// Get one vertex's value of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AttributeNotFound`], [`CodecError::VertexNotFound`],
    /// or [`CodecError::UnsupportedAttributeType`] for boolean attributes.
    pub fn vertex_attribute(&self, name: &str, vertex: VertexId) -> Result<TypedValue> {
        self.check_vertex(vertex)?;
        read_slot(&self.vertex_attributes, Scope::Vertex, name, vertex)
    }

    /// Get one edge's value of an attribute.
    pub fn edge_attribute(&self, name: &str, edge: EdgeId) -> Result<TypedValue> {
        self.check_edge(edge)?;
        read_slot(&self.edge_attributes, Scope::Edge, name, edge)
    }

    /// Get a whole-graph attribute.
    pub fn graph_attribute(&self, name: &str) -> Result<TypedValue> {
        read_slot(&self.graph_attributes, Scope::Graph, name, 0)
    }

    /// Remove an attribute from a scope.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AttributeNotFound`] if it doesn't exist.
    pub fn remove_attribute(&mut self, scope: Scope, name: &str) -> Result<()> {
        if self.table_mut(scope).remove(name) {
            debug!("Removed {scope} attribute '{name}'");
            Ok(())
        } else {
            Err(CodecError::AttributeNotFound {
                scope,
                name: name.to_string(),
            })
        }
    }

    fn table(&self, scope: Scope) -> &AttributeTable {
        match scope {
            Scope::Graph => &self.graph_attributes,
            Scope::Vertex => &self.vertex_attributes,
            Scope::Edge => &self.edge_attributes,
        }
    }

    fn table_mut(&mut self, scope: Scope) -> &mut AttributeTable {
        match scope {
            Scope::Graph => &mut self.graph_attributes,
            Scope::Vertex => &mut self.vertex_attributes,
            Scope::Edge => &mut self.edge_attributes,
        }
    }

    fn scope_len(&self, scope: Scope) -> usize {
        match scope {
            Scope::Graph => 1,
            Scope::Vertex => self.vertex_count,
            Scope::Edge => self.edges.len(),
        }
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(CodecError::VertexNotFound { vertex_id: vertex })
        }
    }

    fn check_edge(&self, edge: EdgeId) -> Result<()> {
        if edge < self.edges.len() {
            Ok(())
        } else {
            Err(CodecError::EdgeNotFound { edge_id: edge })
        }
    }
}

fn set_boolean(column: &mut Column, name: &str, index: usize, value: bool) -> Result<()> {
    match column {
        Column::Boolean(v) => {
            v[index] = value;
            Ok(())
        }
        other => Err(CodecError::AttributeTypeMismatch {
            name: name.to_string(),
            expected: other.type_name().to_string(),
            actual: "Boolean".to_string(),
        }),
    }
}

fn read_slot(table: &AttributeTable, scope: Scope, name: &str, index: usize) -> Result<TypedValue> {
    let column = table
        .column(name)
        .ok_or_else(|| CodecError::AttributeNotFound {
            scope,
            name: name.to_string(),
        })?;
    match column {
        Column::Boolean(_) => Err(CodecError::UnsupportedAttributeType {
            scope,
            name: name.to_string(),
            tag: column.tag().0,
        }),
        _ => column.get(index).ok_or_else(|| CodecError::InvalidOperation {
            message: format!("{scope} attribute '{name}' has no slot {index}"),
        }),
    }
}

impl AttributedGraph for AttributeGraph {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self) -> Vec<(VertexId, VertexId)> {
        self.edges.clone()
    }

    fn attribute_descriptors(&self, scope: Scope) -> Vec<AttributeDescriptor> {
        self.table(scope).descriptors()
    }

    fn attribute_values(&self, scope: Scope, name: &str) -> Result<Vec<TypedValue>> {
        let column = self
            .table(scope)
            .column(name)
            .ok_or_else(|| CodecError::AttributeNotFound {
                scope,
                name: name.to_string(),
            })?;
        match column {
            Column::Numeric(v) => Ok(v.iter().map(|n| TypedValue::Numeric(*n)).collect()),
            Column::Text(v) => Ok(v.iter().cloned().map(TypedValue::Text).collect()),
            Column::Boolean(_) => Err(CodecError::UnsupportedAttributeType {
                scope,
                name: name.to_string(),
                tag: column.tag().0,
            }),
        }
    }
}

impl AttributedGraphMut for AttributeGraph {
    fn add_vertices(&mut self, count: usize) -> Result<()> {
        AttributeGraph::add_vertices(self, count);
        Ok(())
    }

    fn add_edges(&mut self, pairs: &[(VertexId, VertexId)]) -> Result<()> {
        AttributeGraph::add_edges(self, pairs).map(|_| ())
    }

    fn set_attribute_values(
        &mut self,
        scope: Scope,
        name: &str,
        kind: ValueKind,
        values: Vec<TypedValue>,
    ) -> Result<()> {
        let expected = self.scope_len(scope);
        if values.len() != expected {
            return Err(CodecError::InvalidOperation {
                message: format!(
                    "{scope} attribute '{name}' needs {expected} values, got {}",
                    values.len()
                ),
            });
        }

        let mut column = Column::filled(kind, 0);
        for value in values {
            match (&mut column, value) {
                (Column::Numeric(v), TypedValue::Numeric(n)) => v.push(n),
                (Column::Text(v), TypedValue::Text(s)) => v.push(s),
                (_, value) => {
                    return Err(CodecError::AttributeTypeMismatch {
                        name: name.to_string(),
                        expected: kind.to_string(),
                        actual: value.kind().to_string(),
                    })
                }
            }
        }

        debug!("Setting {expected} values of {scope} attribute '{name}' ({kind})");
        self.table_mut(scope).replace(name, column);
        Ok(())
    }
}
