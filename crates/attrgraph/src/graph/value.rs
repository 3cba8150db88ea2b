//! Attribute values and their type tags.
//!
//! An attribute holds exactly one kind of value for every element. The kind is
//! recorded once per attribute as a [`TypeTag`], never per value.

use serde::{Deserialize, Serialize};

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    /// Floating point value (weights, ids, scores)
    Numeric(f64),
    /// String value (labels, names)
    Text(String),
}

/// The value kinds the codec can persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// [`TypedValue::Numeric`]
    Numeric,
    /// [`TypedValue::Text`]
    Text,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Numeric => write!(f, "Numeric"),
            ValueKind::Text => write!(f, "Text"),
        }
    }
}

impl ValueKind {
    /// The tag written to the stream for this kind.
    pub fn tag(self) -> TypeTag {
        match self {
            ValueKind::Numeric => TypeTag::NUMERIC,
            ValueKind::Text => TypeTag::TEXT,
        }
    }

    /// Value used for elements that never had this attribute set.
    pub fn default_value(self) -> TypedValue {
        match self {
            ValueKind::Numeric => TypedValue::Numeric(f64::NAN),
            ValueKind::Text => TypedValue::Text(String::new()),
        }
    }
}

/// Raw integer discriminant identifying an attribute's value type.
///
/// Numbering follows the classic C attribute handler: 1 numeric, 2 boolean,
/// 3 string. Only [`TypeTag::NUMERIC`] and [`TypeTag::TEXT`] resolve to a
/// [`ValueKind`]; every other tag is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag(pub i64);

impl TypeTag {
    /// Numeric attribute.
    pub const NUMERIC: TypeTag = TypeTag(1);
    /// Boolean attribute (stored by [`AttributeGraph`](crate::AttributeGraph), not persisted).
    pub const BOOLEAN: TypeTag = TypeTag(2);
    /// String attribute.
    pub const TEXT: TypeTag = TypeTag(3);

    /// Resolve the tag to a persistable kind.
    pub fn kind(self) -> Option<ValueKind> {
        match self {
            TypeTag::NUMERIC => Some(ValueKind::Numeric),
            TypeTag::TEXT => Some(ValueKind::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TypedValue {
    /// Kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Numeric(_) => ValueKind::Numeric,
            TypedValue::Text(_) => ValueKind::Text,
        }
    }

    /// Numeric payload, if this is a numeric value.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            TypedValue::Numeric(n) => Some(*n),
            TypedValue::Text(_) => None,
        }
    }

    /// Text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            TypedValue::Numeric(_) => None,
        }
    }

    /// Equality that compares numerics by bit pattern, so `NaN == NaN`.
    pub fn bit_eq(&self, other: &TypedValue) -> bool {
        match (self, other) {
            (TypedValue::Numeric(a), TypedValue::Numeric(b)) => a.to_bits() == b.to_bits(),
            (TypedValue::Text(a), TypedValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Numeric(value)
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Numeric(f64::from(value))
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Text(value.to_string())
    }
}
