//! Graph types and the capabilities the codec relies on.
//!
//! This module defines:
//! - [`TypedValue`] and [`TypeTag`]: attribute values and their tags
//! - [`AttributedGraph`] / [`AttributedGraphMut`]: what the codec needs from a graph
//! - [`AttributeGraph`]: an in-memory graph implementing both

mod attribute_graph;
mod traits;
mod types;
mod value;

pub use attribute_graph::AttributeGraph;
pub use traits::{AttributedGraph, AttributedGraphMut};
pub use types::{AttributeDescriptor, EdgeId, Scope, VertexId};
pub use value::{TypeTag, TypedValue, ValueKind};
