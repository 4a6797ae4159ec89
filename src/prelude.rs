//! Convenient imports for dynadoc.
//!
//! ```
//! use dynadoc::prelude::*;
//!
//! let codec = ItemCodec::new();
//! let doc = Record::new().with("name", "Alice");
//! # let _ = (codec, doc);
//! ```

// Main entry point
pub use crate::codec::{ItemCodec, ItemCodecBuilder};

// Error handling
pub use dynadoc_core::{CodecError, Result};

// Document model
pub use dynadoc_core::{DocValue, Document, FieldType, Record};

// Special-type hooks
pub use dynadoc_core::{NoSpecials, SpecialCodec, TimestampCodec};

// Tree and wire
pub use dynadoc_core::{Kind, SetKind, Value};
pub use dynadoc_wire::{KeySchema, WireSink, WireSource};
