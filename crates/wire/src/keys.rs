//! Key-field projection
//!
//! Builds the key of an item: the partition key field, plus the sort key
//! field when the table has one. Each field is read through
//! [`Document::get_field`] and encoded on its own; nothing else in the
//! document is touched.

use std::collections::HashMap;

use dynadoc_core::{encode_value, Document, Result, SpecialCodec, TreeBuilder, Value};
use tracing::debug;

use crate::encode::render;
use crate::sink::WireSink;

/// Names of a table's key attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    partition_key: String,
    sort_key: Option<String>,
}

impl KeySchema {
    /// A schema with only a partition key
    pub fn new(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    /// Add a sort key. An empty name leaves the schema without one.
    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        let sort_key = sort_key.into();
        self.sort_key = (!sort_key.is_empty()).then_some(sort_key);
        self
    }

    /// Partition key field name
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// Sort key field name, if any
    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    fn fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.partition_key.as_str()).chain(self.sort_key())
    }
}

/// Project the key fields of `doc` into tagged-value nodes.
///
/// Fails on the first field that cannot be read.
pub fn encode_key_fields(
    doc: &dyn Document,
    keys: &KeySchema,
    special: &dyn SpecialCodec,
) -> Result<HashMap<String, Value>> {
    let mut out = HashMap::with_capacity(2);
    for name in keys.fields() {
        let field = doc.get_field(name)?;
        let mut builder = TreeBuilder::new();
        encode_value(&field, &mut builder, special)?;
        out.insert(name.to_string(), builder.finish()?);
    }
    debug!(
        partition_key = keys.partition_key(),
        sort_key = keys.sort_key(),
        "projected key fields"
    );
    Ok(out)
}

/// Project the key fields of `doc` straight into wire attributes
pub fn key_attributes<A: WireSink>(
    doc: &dyn Document,
    keys: &KeySchema,
    special: &dyn SpecialCodec,
) -> Result<HashMap<String, A>> {
    encode_key_fields(doc, keys, special)?
        .iter()
        .map(|(name, value)| Ok((name.clone(), render(value)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v2;
    use dynadoc_core::{CodecError, Record, TimestampCodec};

    fn doc() -> Record {
        Record::new()
            .with("id", "abc")
            .with("ts", 7i64)
            .with("body", "ignored")
    }

    #[test]
    fn test_empty_sort_key_is_absent() {
        let keys = KeySchema::new("id").with_sort_key("");
        assert_eq!(keys.sort_key(), None);
        assert_eq!(keys, KeySchema::new("id"));
    }

    #[test]
    fn test_partition_key_only() {
        let keys = KeySchema::new("id");
        let out = encode_key_fields(&doc(), &keys, &TimestampCodec).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["id"], Value::from("abc"));
    }

    #[test]
    fn test_with_sort_key() {
        let keys = KeySchema::new("id").with_sort_key("ts");
        let out = key_attributes::<v2::AttributeValue>(&doc(), &keys, &TimestampCodec).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["id"], v2::AttributeValue::S("abc".into()));
        assert_eq!(out["ts"], v2::AttributeValue::N("7".into()));
    }

    #[test]
    fn test_missing_partition_key_fails() {
        let keys = KeySchema::new("pk").with_sort_key("ts");
        let err = encode_key_fields(&doc(), &keys, &TimestampCodec).unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldNotFound {
                field: "pk".to_string()
            }
        );
    }

    #[test]
    fn test_missing_sort_key_fails() {
        let keys = KeySchema::new("id").with_sort_key("nope");
        let err = encode_key_fields(&doc(), &keys, &TimestampCodec).unwrap_err();
        assert!(err.is_not_found());
    }
}
