//! Encode/decode protocol for attributed graphs.
//!
//! [`encode`] linearizes a graph into a [`GraphSink`]; [`decode`] and
//! [`decode_into`] rebuild one from a [`GraphSource`]. The two walk the same
//! field sequence, so any sink/source pair that preserves write order can
//! carry a graph:
//!
//! - [`binary`]: compact little-endian layout
//! - [`json`]: one ordered JSON object (feature `json`)

pub mod array;
pub mod binary;
pub mod catalog;
mod decoder;
mod encoder;
#[cfg(feature = "json")]
pub mod json;
pub mod stream;

pub use binary::{BinarySink, BinarySource};
pub use decoder::{decode, decode_into};
pub use encoder::encode;
#[cfg(feature = "json")]
pub use json::{JsonOptions, JsonSink, JsonSource};
pub use stream::{GraphSink, GraphSource};
