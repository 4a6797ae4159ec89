//! Tagged-value tree
//!
//! [`Value`] is the in-memory bridge between a document and the provider's
//! attribute wire format. Exactly one kind is active per node, and each child
//! node is owned by exactly one parent.
//!
//! ## Invariants
//!
//! - A `String` node never carries empty text; the empty string is `Null`.
//!   An empty string and an explicit null are indistinguishable after a
//!   round trip.
//! - `Bytes` and `List` are distinct kinds even when both are empty.
//! - `Complex` has no wire kind of its own. It renders as a two-element list
//!   of numbers (real, then imaginary).
//! - Decoded numbers take the narrowest lossless kind: `Int`, then `Uint`,
//!   then `Float`. The kind chosen at encode time is not preserved.
//! - `Unsupported` marks a provider set attribute. It has no usable payload
//!   and every read of it fails.

use std::collections::HashMap;
use std::fmt;

/// A node in the tagged-value tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null, and also the empty string
    Null,

    /// Boolean
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit unsigned integer
    Uint(u64),

    /// 64-bit IEEE-754 floating point
    Float(f64),

    /// Raw bytes, distinct from `List` even when empty
    Bytes(Vec<u8>),

    /// Non-empty UTF-8 text
    String(String),

    /// Complex number with 64-bit parts
    Complex {
        /// Real part
        re: f64,
        /// Imaginary part
        im: f64,
    },

    /// Ordered sequence of child nodes
    List(Vec<Value>),

    /// Name-keyed children; order is not significant
    Map(HashMap<String, Value>),

    /// A provider set attribute that is recognized but not decodable
    Unsupported(SetKind),
}

/// The kind tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// See [`Value::Null`]
    Null,
    /// See [`Value::Bool`]
    Bool,
    /// See [`Value::Int`]
    Int64,
    /// See [`Value::Uint`]
    Uint64,
    /// See [`Value::Float`]
    Float64,
    /// See [`Value::Bytes`]
    Bytes,
    /// See [`Value::String`]
    String,
    /// See [`Value::Complex`]
    Complex128,
    /// See [`Value::List`]
    List,
    /// See [`Value::Map`]
    Map,
    /// See [`Value::Unsupported`]
    Unsupported,
}

impl Kind {
    /// Lowercase name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int64 => "int64",
            Kind::Uint64 => "uint64",
            Kind::Float64 => "float64",
            Kind::Bytes => "bytes",
            Kind::String => "string",
            Kind::Complex128 => "complex128",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Unsupported => "unsupported",
        }
    }

    /// Whether this kind renders as a wire number
    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int64 | Kind::Uint64 | Kind::Float64)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provider set kinds, rejected at decode time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// `SS`
    StringSet,
    /// `NS`
    NumberSet,
    /// `BS`
    BinarySet,
}

impl SetKind {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SetKind::StringSet => "string set",
            SetKind::NumberSet => "number set",
            SetKind::BinarySet => "binary set",
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Build a string node, collapsing the empty string to `Null`.
    pub fn string(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Value::Null
        } else {
            Value::String(s)
        }
    }

    /// The active kind tag
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int64,
            Value::Uint(_) => Kind::Uint64,
            Value::Float(_) => Kind::Float64,
            Value::Bytes(_) => Kind::Bytes,
            Value::String(_) => Kind::String,
            Value::Complex { .. } => Kind::Complex128,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Unsupported(_) => Kind::Unsupported,
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as list slice
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as map reference
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(entries: HashMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}
