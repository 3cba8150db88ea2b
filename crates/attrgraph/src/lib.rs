//! # attrgraph
//!
//! Persist attributed graphs (vertices, edges and typed per-element
//! attributes) to a byte or text stream and rebuild an equivalent graph.
//!
//! ## Core Principles
//!
//! - **Graph Agnostic**: the codec only needs [`AttributedGraph`] / [`AttributedGraphMut`]
//! - **Format Agnostic**: any [`GraphSink`] / [`GraphSource`] pair that keeps write order works
//! - **Positional Framing**: fields are read back in the order they were written
//! - **Fail Fast**: unsupported graphs are rejected before a single byte is written
//!
//! ## Architecture
//!
//! ```text
//! save_graph / load_graph (files, format selection)
//!     ↓
//! encode / decode (field order, catalogs, one attribute at a time)
//!     ↓
//! Typed arrays (dispatch on the attribute's type tag)
//!     ↓
//! GraphSink / GraphSource (binary, JSON)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use attrgraph::{codec, AttributeGraph, BinarySink, BinarySource, TypedValue};
//!
//! let mut graph = AttributeGraph::undirected();
//! graph.add_vertices(3);
//! graph.add_edge(0, 1)?;
//! graph.add_edge(1, 2)?;
//! graph.set_vertex_attribute("label", 0, "root")?;
//! graph.set_edge_attribute("weight", 1, 0.5)?;
//!
//! let mut sink = BinarySink::new(Vec::new());
//! codec::encode(&graph, &mut sink)?;
//! let bytes = sink.into_inner();
//!
//! let copy: AttributeGraph = codec::decode(&mut BinarySource::new(&bytes[..]))?;
//! assert_eq!(copy.edges(), graph.edges());
//! assert_eq!(copy.vertex_attribute("label", 0)?, TypedValue::from("root"));
//! # Ok::<(), attrgraph::CodecError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod codec;
pub mod error;
pub mod format;
pub mod graph;

// Re-export main types
pub use codec::{decode, decode_into, encode, BinarySink, BinarySource, GraphSink, GraphSource};
#[cfg(feature = "json")]
pub use codec::{JsonOptions, JsonSink, JsonSource};
pub use error::{CodecError, Result};
pub use format::{from_bytes, load_graph, load_graph_as, save_graph, to_bytes, Format, SaveOptions};
pub use graph::{
    AttributeDescriptor, AttributeGraph, AttributedGraph, AttributedGraphMut, EdgeId, Scope,
    TypeTag, TypedValue, ValueKind, VertexId,
};
