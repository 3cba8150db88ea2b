//! Sink and source abstractions over a concrete wire format.
//!
//! A stream is a strict sequence of fields: named counts and named arrays of
//! scalars. Each array's length is written before its elements. Readers
//! consume fields in exactly the order they were written; field names are
//! advisory and a backend may drop them entirely.
//!
//! Implementations:
//! - [`BinarySink`](super::binary::BinarySink) / [`BinarySource`](super::binary::BinarySource)
//! - [`JsonSink`](super::json::JsonSink) / [`JsonSource`](super::json::JsonSource) (feature `json`)

use crate::error::Result;

/// Destination of an encoded graph.
pub trait GraphSink {
    /// Write a named non-negative count.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Io`](crate::CodecError::Io) if the write fails.
    fn write_count(&mut self, name: &str, count: u64) -> Result<()>;

    /// Open a named array of `len` scalars.
    ///
    /// Exactly `len` scalar writes must follow before [`GraphSink::end_array`].
    fn begin_array(&mut self, name: &str, len: u64) -> Result<()>;

    /// Write an integer element of the open array.
    fn write_integer(&mut self, value: i64) -> Result<()>;

    /// Write a numeric element of the open array.
    fn write_number(&mut self, value: f64) -> Result<()>;

    /// Write a text element of the open array.
    fn write_text(&mut self, value: &str) -> Result<()>;

    /// Close the open array.
    fn end_array(&mut self) -> Result<()>;

    /// Complete the stream and flush it to the underlying writer.
    ///
    /// Nothing may be written after `finish`.
    fn finish(&mut self) -> Result<()>;
}

/// Origin of an encoded graph.
pub trait GraphSource {
    /// Read the next field as a count.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CorruptStream`](crate::CodecError::CorruptStream)
    /// if the next field is not a count (or, for named backends, not `name`).
    fn read_count(&mut self, name: &str) -> Result<u64>;

    /// Open the next field as an array and return its length.
    fn begin_array(&mut self, name: &str) -> Result<u64>;

    /// Read an integer element of the open array.
    fn read_integer(&mut self) -> Result<i64>;

    /// Read a numeric element of the open array.
    fn read_number(&mut self) -> Result<f64>;

    /// Read a text element of the open array.
    fn read_text(&mut self) -> Result<String>;

    /// Close the open array; every element must have been read.
    fn end_array(&mut self) -> Result<()>;

    /// Assert that the stream holds no further fields.
    fn finish(&mut self) -> Result<()>;
}
