//! Homogeneous attribute arrays, dispatched on the attribute's value kind.

use super::catalog::resolve_kind;
use super::stream::{GraphSink, GraphSource};
use crate::error::{CodecError, Result};
use crate::graph::{AttributeDescriptor, Scope, TypedValue, ValueKind};

/// Upper bound on capacity reserved from a count read off the stream.
pub(crate) const PREALLOC_LIMIT: usize = 1 << 16;

/// Write `values` as one array field.
///
/// Every value must be of `kind`; this is checked before anything is
/// written so a mismatch never leaves a half-written array behind.
///
/// # Errors
///
/// Returns [`CodecError::AttributeTypeMismatch`] for a value of another kind,
/// or any error from the sink.
pub fn encode_array<S: GraphSink + ?Sized>(
    sink: &mut S,
    field: &str,
    kind: ValueKind,
    values: &[TypedValue],
) -> Result<()> {
    if let Some(stray) = values.iter().find(|v| v.kind() != kind) {
        return Err(CodecError::AttributeTypeMismatch {
            name: field.to_string(),
            expected: kind.to_string(),
            actual: stray.kind().to_string(),
        });
    }

    sink.begin_array(field, values.len() as u64)?;
    match kind {
        ValueKind::Numeric => {
            for value in values {
                if let TypedValue::Numeric(n) = value {
                    sink.write_number(*n)?;
                }
            }
        }
        ValueKind::Text => {
            for value in values {
                if let TypedValue::Text(s) = value {
                    sink.write_text(s)?;
                }
            }
        }
    }
    sink.end_array()
}

/// Read one array field holding the values of `descriptor`.
///
/// # Errors
///
/// - [`CodecError::UnsupportedAttributeType`] if the tag is neither Numeric nor Text
/// - [`CodecError::CorruptStream`] if the array length is not `expected_count`
pub fn decode_array<S: GraphSource + ?Sized>(
    source: &mut S,
    field: &str,
    scope: Scope,
    descriptor: &AttributeDescriptor,
    expected_count: usize,
) -> Result<Vec<TypedValue>> {
    let kind = resolve_kind(scope, descriptor)?;

    let len = source.begin_array(field)?;
    if len != expected_count as u64 {
        return Err(CodecError::corrupt(format!(
            "{scope} attribute '{}' has {len} values, expected {expected_count}",
            descriptor.name
        )));
    }

    let mut values = Vec::with_capacity(expected_count.min(PREALLOC_LIMIT));
    match kind {
        ValueKind::Numeric => {
            for _ in 0..expected_count {
                values.push(TypedValue::Numeric(source.read_number()?));
            }
        }
        ValueKind::Text => {
            for _ in 0..expected_count {
                values.push(TypedValue::Text(source.read_text()?));
            }
        }
    }
    source.end_array()?;
    Ok(values)
}
