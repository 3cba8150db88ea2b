//! JSON backend.
//!
//! The stream becomes a single JSON object. Every field is a key, inserted in
//! write order; counts are integers and arrays are JSON arrays:
//!
//! ```json
//! {
//!   "num_vertices": 2,
//!   "num_edges": 1,
//!   "edges": [0, 1],
//!   "vertex_attr_names": ["label"],
//!   "vertex_attr_types": [3],
//!   "vertex_attr:label": ["a", "b"],
//!   "edge_attr_names": [],
//!   "edge_attr_types": []
//! }
//! ```
//!
//! JSON has no literal for non-finite numbers, so `NaN`, `inf` and `-inf` are
//! written as strings. NaN payload bits are not preserved.
//!
//! Keys are read back in order and only checked against the expected name;
//! the object is never used as a lookup table.

use super::stream::{GraphSink, GraphSource};
use crate::error::{CodecError, Result};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::io::{Read, Write};

/// Output options for [`JsonSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOptions {
    /// Indent the document for human readers
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Builds the JSON document in memory and writes it on [`GraphSink::finish`].
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    options: JsonOptions,
    root: Map<String, Value>,
    open: Option<OpenArray>,
    finished: bool,
}

#[derive(Debug)]
struct OpenArray {
    name: String,
    declared: u64,
    items: Vec<Value>,
}

impl<W: Write> JsonSink<W> {
    /// Wrap a writer with default (pretty) output.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, JsonOptions::default())
    }

    /// Wrap a writer with explicit options.
    pub fn with_options(writer: W, options: JsonOptions) -> Self {
        Self {
            writer,
            options,
            root: Map::new(),
            open: None,
            finished: false,
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn check_field(&self, name: &str) -> Result<()> {
        if self.finished {
            return Err(CodecError::InvalidOperation {
                message: format!("field '{name}' written after finish"),
            });
        }
        if self.open.is_some() {
            return Err(CodecError::InvalidOperation {
                message: format!("field '{name}' written inside an open array"),
            });
        }
        if self.root.contains_key(name) {
            return Err(CodecError::InvalidOperation {
                message: format!("duplicate field '{name}'"),
            });
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, value: Value) -> Result<()> {
        self.check_field(name)?;
        self.root.insert(name.to_string(), value);
        Ok(())
    }

    fn push(&mut self, value: Value) -> Result<()> {
        let open = self.open.as_mut().ok_or_else(|| CodecError::InvalidOperation {
            message: "element written outside an array".to_string(),
        })?;
        if open.items.len() as u64 >= open.declared {
            return Err(CodecError::InvalidOperation {
                message: format!("more elements written to '{}' than declared", open.name),
            });
        }
        open.items.push(value);
        Ok(())
    }
}

/// JSON representation of a numeric scalar.
fn number_to_json(value: f64) -> Value {
    match Number::from_f64(value) {
        Some(number) => Value::Number(number),
        None if value.is_nan() => Value::String("NaN".to_string()),
        None if value > 0.0 => Value::String("inf".to_string()),
        None => Value::String("-inf".to_string()),
    }
}

fn number_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "inf" => Some(f64::INFINITY),
            "-inf" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

impl<W: Write> GraphSink for JsonSink<W> {
    fn write_count(&mut self, name: &str, count: u64) -> Result<()> {
        trace!("json: count {name} = {count}");
        self.insert(name, Value::from(count))
    }

    fn begin_array(&mut self, name: &str, len: u64) -> Result<()> {
        self.check_field(name)?;
        trace!("json: array {name} [{len}]");
        self.open = Some(OpenArray {
            name: name.to_string(),
            declared: len,
            items: Vec::with_capacity(len.min(4096) as usize),
        });
        Ok(())
    }

    fn write_integer(&mut self, value: i64) -> Result<()> {
        self.push(Value::from(value))
    }

    fn write_number(&mut self, value: f64) -> Result<()> {
        self.push(number_to_json(value))
    }

    fn write_text(&mut self, value: &str) -> Result<()> {
        self.push(Value::String(value.to_string()))
    }

    fn end_array(&mut self) -> Result<()> {
        let open = self.open.take().ok_or_else(|| CodecError::InvalidOperation {
            message: "no array is open".to_string(),
        })?;
        if open.items.len() as u64 != open.declared {
            return Err(CodecError::InvalidOperation {
                message: format!(
                    "array '{}' closed with {} of {} elements",
                    open.name,
                    open.items.len(),
                    open.declared
                ),
            });
        }
        self.insert(&open.name, Value::Array(open.items))
    }

    fn finish(&mut self) -> Result<()> {
        if self.open.is_some() {
            return Err(CodecError::InvalidOperation {
                message: "finish called inside an open array".to_string(),
            });
        }
        if self.finished {
            return Err(CodecError::InvalidOperation {
                message: "finish called twice".to_string(),
            });
        }
        self.finished = true;

        let document = Value::Object(std::mem::take(&mut self.root));
        let written = if self.options.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)
        } else {
            serde_json::to_writer(&mut self.writer, &document)
        };
        written.map_err(|e| CodecError::io("Failed to write JSON stream", Some(e)))?;
        self.writer
            .flush()
            .map_err(|e| CodecError::io("Failed to flush JSON stream", Some(e)))
    }
}

/// Reads a document written by [`JsonSink`], field by field.
pub struct JsonSource {
    entries: serde_json::map::IntoIter,
    open: Option<std::vec::IntoIter<Value>>,
}

impl std::fmt::Debug for JsonSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSource")
            .field("remaining_fields", &self.entries.len())
            .field("open_array", &self.open.as_ref().map(|items| items.len()))
            .finish()
    }
}

impl JsonSource {
    /// Parse a whole document from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Io`] for read failures and
    /// [`CodecError::CorruptStream`] for malformed JSON or a top level that
    /// is not an object.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: Value = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                CodecError::io("Failed to read JSON stream", Some(e))
            } else {
                CodecError::corrupt(format!("invalid JSON: {e}"))
            }
        })?;
        Self::from_value(document)
    }

    /// Read from an already parsed document.
    pub fn from_value(document: Value) -> Result<Self> {
        match document {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter(),
                open: None,
            }),
            other => Err(CodecError::corrupt(format!(
                "top-level JSON value must be an object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    fn next_field(&mut self, name: &str) -> Result<Value> {
        if self.open.is_some() {
            return Err(CodecError::InvalidOperation {
                message: format!("field '{name}' read inside an open array"),
            });
        }
        match self.entries.next() {
            Some((key, value)) if key == name => Ok(value),
            Some((key, _)) => Err(CodecError::corrupt(format!(
                "expected field '{name}', found '{key}'"
            ))),
            None => Err(CodecError::corrupt(format!("missing field '{name}'"))),
        }
    }

    fn next_item(&mut self) -> Result<Value> {
        let open = self.open.as_mut().ok_or_else(|| CodecError::InvalidOperation {
            message: "element read outside an array".to_string(),
        })?;
        open.next()
            .ok_or_else(|| CodecError::corrupt("read past the end of an array"))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl GraphSource for JsonSource {
    fn read_count(&mut self, name: &str) -> Result<u64> {
        let value = self.next_field(name)?;
        let count = value.as_u64().ok_or_else(|| {
            CodecError::corrupt(format!(
                "field '{name}' must be a non-negative integer, found {}",
                json_type_name(&value)
            ))
        })?;
        trace!("json: count {name} = {count}");
        Ok(count)
    }

    fn begin_array(&mut self, name: &str) -> Result<u64> {
        match self.next_field(name)? {
            Value::Array(items) => {
                let len = items.len() as u64;
                trace!("json: array {name} [{len}]");
                self.open = Some(items.into_iter());
                Ok(len)
            }
            other => Err(CodecError::corrupt(format!(
                "field '{name}' must be an array, found {}",
                json_type_name(&other)
            ))),
        }
    }

    fn read_integer(&mut self) -> Result<i64> {
        let value = self.next_item()?;
        value.as_i64().ok_or_else(|| {
            CodecError::corrupt(format!(
                "expected integer element, found {}",
                json_type_name(&value)
            ))
        })
    }

    fn read_number(&mut self) -> Result<f64> {
        let value = self.next_item()?;
        number_from_json(&value).ok_or_else(|| {
            CodecError::corrupt(format!(
                "expected numeric element, found {}",
                json_type_name(&value)
            ))
        })
    }

    fn read_text(&mut self) -> Result<String> {
        match self.next_item()? {
            Value::String(s) => Ok(s),
            other => Err(CodecError::corrupt(format!(
                "expected text element, found {}",
                json_type_name(&other)
            ))),
        }
    }

    fn end_array(&mut self) -> Result<()> {
        match self.open.take() {
            Some(rest) if rest.as_slice().is_empty() => Ok(()),
            Some(rest) => Err(CodecError::InvalidOperation {
                message: format!("array closed with {} elements unread", rest.len()),
            }),
            None => Err(CodecError::InvalidOperation {
                message: "no array is open".to_string(),
            }),
        }
    }

    fn finish(&mut self) -> Result<()> {
        if self.open.is_some() {
            return Err(CodecError::InvalidOperation {
                message: "finish called inside an open array".to_string(),
            });
        }
        match self.entries.next() {
            None => Ok(()),
            Some((key, _)) => Err(CodecError::corrupt(format!(
                "unexpected trailing field '{key}'"
            ))),
        }
    }
}
