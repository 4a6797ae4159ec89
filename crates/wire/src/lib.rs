//! Attribute wire format for dynadoc
//!
//! This crate renders [`dynadoc_core::Value`] trees as the provider's tagged
//! attribute values and reads them back. Two client generations are
//! supported side by side:
//!
//! - [`v1::AttributeValue`]: a struct of mutually exclusive optional members
//! - [`v2::AttributeValue`]: a tagged union with one variant per member
//!
//! ## Wire Encoding Rules
//!
//! | Value Kind | Wire Member |
//! |------------|-------------|
//! | Null | `NULL: true` |
//! | Bool | `BOOL` |
//! | Int64 / Uint64 / Float64 | `N` (decimal text) |
//! | Bytes | `B` |
//! | String | `S` (never empty) |
//! | Complex128 | `L` of two `N` members |
//! | List | `L` |
//! | Map | `M` |
//!
//! Set members (`SS`, `NS`, `BS`) decode to `Value::Unsupported` and are
//! never produced by the encoder.
//!
//! ## Examples
//!
//! ```
//! use dynadoc_wire::{decode_v2, encode_v1, encode_v2, decode_v1};
//! use dynadoc_core::Value;
//!
//! let value = Value::Int(42);
//! let v1 = encode_v1(&value).unwrap();
//! assert_eq!(v1.n.as_deref(), Some("42"));
//!
//! let v2 = encode_v2(&value).unwrap();
//! assert_eq!(decode_v2(&v2).unwrap(), decode_v1(&v1).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod base64_serde;
pub mod decode;
pub mod encode;
pub mod keys;
pub mod number;
pub mod sink;
pub mod v1;
pub mod v2;

// Re-export main types
pub use decode::{decode_v1, decode_v2, parse, parse_item, WireDriver};
pub use encode::{encode_v1, encode_v2, render, render_map};
pub use keys::{encode_key_fields, key_attributes, KeySchema};
pub use sink::{WireSink, WireSource, WireView};
