//! Error types for the attribute codec
//!
//! Every failure in the codec surfaces as a [`CodecError`]. The codec performs
//! no I/O, so none of these are transient and none are retried.
//!
//! ## Taxonomy
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | FieldNotFound | A named field cannot be read from a document |
//! | UnknownKind | Rendering meets a node with no wire mapping |
//! | NotAMap | An item-level render is asked for a non-map root |
//! | InvalidNumber | Wire number text fails decimal parsing |
//! | UnsupportedSet | A string/number/binary set is read as a concrete value |
//! | TypeMismatch | A destination expects a different shape than the node |
//! | InvalidTimestamp | Timestamp text fails strict RFC 3339 parsing |
//! | Incomplete | A structural builder is read before it is fully populated |
//! | SpecialNotEncoded | A special hook accepted a value but emitted nothing |
//! | NoEncoding | A document value has no generic encoding |
//! | EmptyAttribute | A wire attribute has no member populated |
//! | MissingKeySchema | Key projection requested without a key schema |

use crate::value::{Kind, SetKind};
use thiserror::Error;

/// All codec errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodecError {
    /// A document field could not be found or read
    #[error("field not found: {field}")]
    FieldNotFound {
        /// Name of the missing field
        field: String,
    },

    /// A tagged-value node has no wire rendering rule
    #[error("invalid argument: unknown type to encode {kind}")]
    UnknownKind {
        /// The offending kind
        kind: Kind,
    },

    /// An item was requested from a root that is not a map
    #[error("invalid argument: incorrect type to encode {kind}, not map")]
    NotAMap {
        /// Kind of the root node
        kind: Kind,
    },

    /// Wire number text is not a decimal number
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// Provider set kinds are recognized but never decoded
    #[error(
        "unsupported type {set}: DynamoDB set types (string set, number set, binary set) are not decoded"
    )]
    UnsupportedSet {
        /// Which set kind was rejected
        set: SetKind,
    },

    /// Destination type does not match the node shape
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Shape the destination expects
        expected: &'static str,
        /// Shape actually found
        actual: &'static str,
    },

    /// Timestamp text is not valid RFC 3339
    #[error("invalid timestamp {text:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected text
        text: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A builder node was read before every slot was filled
    #[error("incomplete value: {0}")]
    Incomplete(String),

    /// A special hook claimed a value without emitting a primitive
    #[error("special encoder for {0} accepted the value but encoded nothing")]
    SpecialNotEncoded(&'static str),

    /// A document value has no generic encoding
    #[error("no encoding for {0} values")]
    NoEncoding(&'static str),

    /// A wire attribute with no member populated
    #[error("attribute value has no member set")]
    EmptyAttribute,

    /// Key projection without a configured key schema
    #[error("no key schema configured")]
    MissingKeySchema,
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Build a type mismatch error.
    pub fn mismatch(expected: &'static str, actual: &'static str) -> Self {
        CodecError::TypeMismatch { expected, actual }
    }

    /// Check if this error belongs to the invalid-argument class.
    ///
    /// These indicate the caller handed the encoder something it can never
    /// render, as opposed to malformed input on the decode side.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CodecError::UnknownKind { .. } | CodecError::NotAMap { .. } | CodecError::NoEncoding(_)
        )
    }

    /// Check if this is the deliberate set-type rejection.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CodecError::UnsupportedSet { .. })
    }

    /// Check if this is a missing-field error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CodecError::FieldNotFound { .. })
    }
}
