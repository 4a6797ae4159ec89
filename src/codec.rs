//! Item codec entry point.
//!
//! This module provides [`ItemCodec`], which ties together a special-type
//! hook and an optional key schema, and [`ItemCodecBuilder`] to configure it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dynadoc_core::{
    decode_document, decode_value, encode_document, encode_value, CodecError, DocValue, Document,
    FieldType, NoSpecials, Result, SpecialCodec, TimestampCodec, TreeBuilder,
};
use dynadoc_wire::{
    key_attributes, parse_item, render, render_map, KeySchema, WireDriver, WireSink, WireSource,
};
use tracing::debug;

/// Encodes documents to provider attributes and decodes them back.
///
/// Every operation is generic over the wire variant, so the same codec
/// serves both client generations.
///
/// # Example
///
/// ```
/// use dynadoc::prelude::*;
/// use dynadoc::wire::v2;
///
/// let codec = ItemCodec::builder().partition_key("id").build();
/// let doc = Record::new().with("id", "abc").with("n", 7i64);
///
/// let item: std::collections::HashMap<String, v2::AttributeValue> =
///     codec.encode_item(&doc).unwrap();
/// assert_eq!(item["n"], v2::AttributeValue::N("7".into()));
///
/// let mut back = Record::new();
/// codec.decode_item(&item, &mut back).unwrap();
/// assert_eq!(back.get("id"), Some(&DocValue::from("abc")));
/// ```
#[derive(Clone)]
pub struct ItemCodec {
    special: Arc<dyn SpecialCodec>,
    keys: Option<KeySchema>,
}

impl ItemCodec {
    /// Create a codec with timestamp handling and no key schema.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for codec configuration.
    pub fn builder() -> ItemCodecBuilder {
        ItemCodecBuilder::new()
    }

    /// The configured key schema, if any.
    pub fn key_schema(&self) -> Option<&KeySchema> {
        self.keys.as_ref()
    }

    /// The configured special-type hook.
    pub fn special(&self) -> &dyn SpecialCodec {
        self.special.as_ref()
    }

    /// Encode a whole document as one wire attribute.
    pub fn encode<A: WireSink>(&self, doc: &dyn Document) -> Result<A> {
        let tree = encode_document(doc, self.special())?;
        render(&tree)
    }

    /// Encode a document as a provider item.
    ///
    /// The document must encode to a map.
    pub fn encode_item<A: WireSink>(&self, doc: &dyn Document) -> Result<HashMap<String, A>> {
        let tree = encode_document(doc, self.special())?;
        let item = render_map(&tree)?;
        debug!(variant = A::VARIANT, fields = item.len(), "encoded item");
        Ok(item)
    }

    /// Decode one wire attribute into `doc`.
    ///
    /// The attribute is read in place without building a tree first.
    pub fn decode<A: WireSource>(&self, attr: &A, doc: &mut dyn Document) -> Result<()> {
        doc.decode(&WireDriver::new(attr), self.special())
    }

    /// Decode a provider item into `doc`.
    pub fn decode_item<A: WireSource>(
        &self,
        item: &HashMap<String, A>,
        doc: &mut dyn Document,
    ) -> Result<()> {
        let tree = parse_item(item)?;
        decode_document(&tree, doc, self.special())?;
        debug!(variant = A::VARIANT, fields = item.len(), "decoded item");
        Ok(())
    }

    /// Encode a single value.
    pub fn encode_value<A: WireSink>(&self, value: &DocValue) -> Result<A> {
        let mut builder = TreeBuilder::new();
        encode_value(value, &mut builder, self.special())?;
        render(&builder.finish()?)
    }

    /// Decode a single attribute for a destination declared as `expected`.
    pub fn decode_value<A: WireSource>(&self, attr: &A, expected: &FieldType) -> Result<DocValue> {
        decode_value(&WireDriver::new(attr), expected, self.special())
    }

    /// Project the key fields of `doc` as wire attributes.
    pub fn key<A: WireSink>(&self, doc: &dyn Document) -> Result<HashMap<String, A>> {
        let keys = self.keys.as_ref().ok_or(CodecError::MissingKeySchema)?;
        key_attributes(doc, keys, self.special())
    }
}

impl Default for ItemCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ItemCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemCodec")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ItemCodec`].
///
/// Defaults to [`TimestampCodec`] and no key schema. A sort key is only
/// used once a partition key is set.
pub struct ItemCodecBuilder {
    partition_key: Option<String>,
    sort_key: Option<String>,
    special: Arc<dyn SpecialCodec>,
}

impl ItemCodecBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            partition_key: None,
            sort_key: None,
            special: Arc::new(TimestampCodec),
        }
    }

    /// Set the partition key field name.
    pub fn partition_key(mut self, name: impl Into<String>) -> Self {
        self.partition_key = Some(name.into());
        self
    }

    /// Set the sort key field name. An empty name means no sort key.
    pub fn sort_key(mut self, name: impl Into<String>) -> Self {
        self.sort_key = Some(name.into());
        self
    }

    /// Use a custom special-type hook.
    pub fn special(mut self, special: impl SpecialCodec + 'static) -> Self {
        self.special = Arc::new(special);
        self
    }

    /// Disable special-type handling.
    ///
    /// Timestamps then have no encoding.
    pub fn without_specials(self) -> Self {
        self.special(NoSpecials)
    }

    /// Build the codec.
    pub fn build(self) -> ItemCodec {
        let keys = self.partition_key.map(|pk| {
            let schema = KeySchema::new(pk);
            match self.sort_key {
                Some(sk) => schema.with_sort_key(sk),
                None => schema,
            }
        });
        ItemCodec {
            special: self.special,
            keys,
        }
    }
}

impl Default for ItemCodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}
