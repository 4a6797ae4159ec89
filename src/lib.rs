//! # dynadoc
//!
//! Document codec for the DynamoDB attribute value wire format.
//!
//! dynadoc turns application documents into the provider's tagged attribute
//! values and back. Documents are first encoded into an in-memory
//! tagged-value tree ([`Value`]), which is then rendered as either client
//! generation's attribute type.
//!
//! ## Quick Start
//!
//! ```
//! use dynadoc::prelude::*;
//! use dynadoc::wire::v1;
//!
//! let codec = ItemCodec::builder().partition_key("id").sort_key("ts").build();
//! let doc = Record::new().with("id", "abc").with("ts", 7i64).with("body", "hi");
//!
//! // Full item
//! let item: std::collections::HashMap<String, v1::AttributeValue> =
//!     codec.encode_item(&doc).unwrap();
//! assert_eq!(item.len(), 3);
//!
//! // Key only
//! let key: std::collections::HashMap<String, v1::AttributeValue> = codec.key(&doc).unwrap();
//! assert_eq!(key.len(), 2);
//! ```
//!
//! ## Layers
//!
//! - [`tree`]: tagged-value tree, observer and decode-driver protocols,
//!   special-type hooks, reference document model
//! - [`wire`]: both attribute variants, number text rules, key projection
//! - [`ItemCodec`]: configured entry point over both

#![warn(missing_docs)]

mod codec;

pub mod prelude;

/// Tagged-value tree and document protocols
pub use dynadoc_core as tree;
/// Provider attribute wire format
pub use dynadoc_wire as wire;

// Re-export main entry points
pub use codec::{ItemCodec, ItemCodecBuilder};
pub use dynadoc_core::{CodecError, Result};

// Re-export core types
pub use dynadoc_core::{DocValue, Document, FieldType, Kind, Record, SetKind, Value};
