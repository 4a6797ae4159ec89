//! Core types for dynadoc
//!
//! This crate defines the tagged-value tree that sits between an application
//! document and the provider's attribute wire format, together with the two
//! protocols the document layer uses to talk to it:
//!
//! - [`ValueObserver`]: typed value notifications on encode, assembled into a
//!   [`Value`] by [`TreeBuilder`]
//! - [`DecodeDriver`]: typed read accessors on decode, implemented by [`Value`]
//!
//! Special application types (timestamps) are handled by a pluggable
//! [`SpecialCodec`]. The wire formats themselves live in `dynadoc-wire`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod driver;
pub mod error;
pub mod observer;
pub mod special;
pub mod value;

pub use document::{
    decode_document, decode_value, encode_document, encode_value, DocValue, Document, FieldType,
    Record,
};
pub use driver::DecodeDriver;
pub use error::{CodecError, Result};
pub use observer::{ListBuilder, MapBuilder, TreeBuilder, ValueObserver};
pub use special::{format_timestamp, parse_timestamp, NoSpecials, SpecialCodec, TimestampCodec};
pub use value::{Kind, SetKind, Value};
