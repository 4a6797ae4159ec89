//! Document layer
//!
//! The codec itself only sees [`ValueObserver`] notifications on the way in
//! and [`DecodeDriver`] reads on the way out. This module is the document side
//! of those protocols: an application value model ([`DocValue`]), declared
//! destination types ([`FieldType`]), and a field-addressable [`Document`].
//!
//! [`encode_value`] and [`decode_value`] are where the special-type hook is
//! consulted: before generic dispatch on encode, and after the generic decode
//! on the way back, keyed by the destination's declared type.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::driver::DecodeDriver;
use crate::error::{CodecError, Result};
use crate::observer::{TreeBuilder, ValueObserver};
use crate::special::SpecialCodec;
use crate::value::{Kind, Value};

/// An application-level value held by a document
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// Absent / nil
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// Floating point
    Float(f64),
    /// Complex number (real, imaginary)
    Complex(f64, f64),
    /// Byte sequence
    Bytes(Vec<u8>),
    /// Text
    String(String),
    /// Instant in time, nanosecond precision
    Timestamp(DateTime<Utc>),
    /// Ordered list
    List(Vec<DocValue>),
    /// Name-keyed map
    Map(BTreeMap<String, DocValue>),
}

impl DocValue {
    /// Short name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            DocValue::Null => "null",
            DocValue::Bool(_) => "bool",
            DocValue::Int(_) => "int64",
            DocValue::Uint(_) => "uint64",
            DocValue::Float(_) => "float64",
            DocValue::Complex(..) => "complex128",
            DocValue::Bytes(_) => "bytes",
            DocValue::String(_) => "string",
            DocValue::Timestamp(_) => "timestamp",
            DocValue::List(_) => "list",
            DocValue::Map(_) => "map",
        }
    }
}

impl From<bool> for DocValue {
    fn from(b: bool) -> Self {
        DocValue::Bool(b)
    }
}

impl From<i64> for DocValue {
    fn from(i: i64) -> Self {
        DocValue::Int(i)
    }
}

impl From<u64> for DocValue {
    fn from(u: u64) -> Self {
        DocValue::Uint(u)
    }
}

impl From<f64> for DocValue {
    fn from(f: f64) -> Self {
        DocValue::Float(f)
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        DocValue::String(s)
    }
}

impl From<DateTime<Utc>> for DocValue {
    fn from(ts: DateTime<Utc>) -> Self {
        DocValue::Timestamp(ts)
    }
}

/// Declared type of a decode destination
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldType {
    /// Whatever the generic decode produces
    #[default]
    Any,
    /// `bool`
    Bool,
    /// `i64`
    Int,
    /// `u64`
    Uint,
    /// `f64`
    Float,
    /// Complex number
    Complex,
    /// Byte sequence
    Bytes,
    /// Text
    String,
    /// Timestamp
    Timestamp,
    /// List with the given element type
    List(Box<FieldType>),
    /// Map with the given value type
    Map(Box<FieldType>),
}

impl FieldType {
    /// Name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Any => "any",
            FieldType::Bool => "bool",
            FieldType::Int => "int64",
            FieldType::Uint => "uint64",
            FieldType::Float => "float64",
            FieldType::Complex => "complex128",
            FieldType::Bytes => "bytes",
            FieldType::String => "string",
            FieldType::Timestamp => "timestamp",
            FieldType::List(_) => "list",
            FieldType::Map(_) => "map",
        }
    }
}

/// A document the codec can read fields from, encode, and decode into.
pub trait Document {
    /// Read one top-level field by name.
    fn get_field(&self, name: &str) -> Result<DocValue>;

    /// Report the whole document to `obs`.
    fn encode(&self, obs: &mut dyn ValueObserver, special: &dyn SpecialCodec) -> Result<()>;

    /// Populate the document from a decoded node.
    fn decode(&mut self, driver: &dyn DecodeDriver, special: &dyn SpecialCodec) -> Result<()>;
}

/// Drive `obs` from `value`.
///
/// The special hook goes first. If it accepts the value it must have called
/// a primitive notification on `obs`, otherwise the encode fails.
pub fn encode_value(
    value: &DocValue,
    obs: &mut dyn ValueObserver,
    special: &dyn SpecialCodec,
) -> Result<()> {
    if special.encode_special(value, obs)? {
        if !obs.is_encoded() {
            return Err(CodecError::SpecialNotEncoded(value.type_name()));
        }
        return Ok(());
    }

    match value {
        DocValue::Null => obs.encode_nil(),
        DocValue::Bool(b) => obs.encode_bool(*b),
        DocValue::Int(i) => obs.encode_int(*i),
        DocValue::Uint(u) => obs.encode_uint(*u),
        DocValue::Float(f) => obs.encode_float(*f),
        DocValue::Complex(re, im) => obs.encode_complex(*re, *im),
        DocValue::Bytes(b) => obs.encode_bytes(b),
        DocValue::String(s) => obs.encode_string(s),
        DocValue::Timestamp(_) => return Err(CodecError::NoEncoding("timestamp")),
        DocValue::List(items) => {
            let mut list = obs.encode_list(items.len());
            for (i, item) in items.iter().enumerate() {
                encode_value(item, list.index(i), special)?;
            }
        }
        DocValue::Map(entries) => {
            let mut map = obs.encode_map(entries.len());
            for (key, item) in entries {
                encode_value(item, map.key(key), special)?;
            }
        }
    }
    Ok(())
}

/// Read `driver` into a value for a destination declared as `expected`.
///
/// Set attributes are rejected before anything else. The special hook then
/// gets the first chance at the destination type, and generic decoding
/// handles the rest. Null decodes to the zero value of scalar destinations.
pub fn decode_value(
    driver: &dyn DecodeDriver,
    expected: &FieldType,
    special: &dyn SpecialCodec,
) -> Result<DocValue> {
    if let Some(set) = driver.unsupported() {
        return Err(CodecError::UnsupportedSet { set });
    }
    if let Some(value) = special.decode_special(expected, driver)? {
        return Ok(value);
    }

    let null = driver.as_null();
    let value = match expected {
        FieldType::Any => return decode_any(driver, special),
        FieldType::Bool if null => DocValue::Bool(false),
        FieldType::Bool => DocValue::Bool(driver.as_bool()?),
        FieldType::Int if null => DocValue::Int(0),
        FieldType::Int => DocValue::Int(driver.as_int()?),
        FieldType::Uint if null => DocValue::Uint(0),
        FieldType::Uint => DocValue::Uint(driver.as_uint()?),
        FieldType::Float if null => DocValue::Float(0.0),
        FieldType::Float => DocValue::Float(driver.as_float()?),
        FieldType::Complex if null => DocValue::Complex(0.0, 0.0),
        FieldType::Complex => {
            let (re, im) = driver.as_complex()?;
            DocValue::Complex(re, im)
        }
        FieldType::String if null => DocValue::String(String::new()),
        FieldType::String => DocValue::String(driver.as_string()?.to_string()),
        FieldType::Bytes | FieldType::List(_) | FieldType::Map(_) if null => DocValue::Null,
        FieldType::Bytes => DocValue::Bytes(driver.as_bytes()?.to_vec()),
        FieldType::Timestamp => {
            return Err(CodecError::mismatch("timestamp", driver.kind().name()))
        }
        FieldType::List(elem) => {
            let mut items = Vec::with_capacity(driver.list_len()?);
            driver.decode_list(&mut |_, item| {
                items.push(decode_value(item, elem, special)?);
                Ok(true)
            })?;
            DocValue::List(items)
        }
        FieldType::Map(elem) => {
            let mut entries = BTreeMap::new();
            driver.decode_map(&mut |key, item| {
                entries.insert(key.to_string(), decode_value(item, elem, special)?);
                Ok(true)
            })?;
            DocValue::Map(entries)
        }
    };
    Ok(value)
}

fn decode_any(driver: &dyn DecodeDriver, special: &dyn SpecialCodec) -> Result<DocValue> {
    let value = match driver.kind() {
        Kind::Null => DocValue::Null,
        Kind::Bool => DocValue::Bool(driver.as_bool()?),
        Kind::Int64 => DocValue::Int(driver.as_int()?),
        Kind::Uint64 => DocValue::Uint(driver.as_uint()?),
        Kind::Float64 => DocValue::Float(driver.as_float()?),
        Kind::Bytes => DocValue::Bytes(driver.as_bytes()?.to_vec()),
        Kind::String => DocValue::String(driver.as_string()?.to_string()),
        Kind::Complex128 => {
            let (re, im) = driver.as_complex()?;
            DocValue::Complex(re, im)
        }
        Kind::List => return decode_value(driver, &FieldType::List(Box::default()), special),
        Kind::Map => return decode_value(driver, &FieldType::Map(Box::default()), special),
        Kind::Unsupported => {
            if let Some(set) = driver.unsupported() {
                return Err(CodecError::UnsupportedSet { set });
            }
            // No payload: surface the driver's own read error
            return Err(driver
                .as_bool()
                .err()
                .unwrap_or_else(|| CodecError::mismatch("value", Kind::Unsupported.name())));
        }
    };
    Ok(value)
}

/// Encode a whole document into a tagged-value tree.
pub fn encode_document(doc: &dyn Document, special: &dyn SpecialCodec) -> Result<Value> {
    let mut builder = TreeBuilder::new();
    doc.encode(&mut builder, special)?;
    builder.finish()
}

/// Decode a tagged-value tree into a document.
pub fn decode_document(
    value: &Value,
    doc: &mut dyn Document,
    special: &dyn SpecialCodec,
) -> Result<()> {
    doc.decode(value, special)
}

/// A map-backed document with optional declared field types.
///
/// Fields without a declared type decode as [`FieldType::Any`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, DocValue>,
    schema: BTreeMap<String, FieldType>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<DocValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Declare a field's destination type, builder style.
    pub fn with_type(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.schema.insert(name.into(), ty);
        self
    }

    /// Set a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<DocValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Borrow a field.
    pub fn get(&self, name: &str) -> Option<&DocValue> {
        self.fields.get(name)
    }

    /// All fields.
    pub fn fields(&self) -> &BTreeMap<String, DocValue> {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Document for Record {
    fn get_field(&self, name: &str) -> Result<DocValue> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| CodecError::FieldNotFound {
                field: name.to_string(),
            })
    }

    fn encode(&self, obs: &mut dyn ValueObserver, special: &dyn SpecialCodec) -> Result<()> {
        let mut map = obs.encode_map(self.fields.len());
        for (name, value) in &self.fields {
            encode_value(value, map.key(name), special)?;
        }
        Ok(())
    }

    fn decode(&mut self, driver: &dyn DecodeDriver, special: &dyn SpecialCodec) -> Result<()> {
        if let Some(set) = driver.unsupported() {
            return Err(CodecError::UnsupportedSet { set });
        }
        let schema = &self.schema;
        let mut decoded = BTreeMap::new();
        driver.decode_map(&mut |name, item| {
            let expected = schema.get(name).cloned().unwrap_or_default();
            decoded.insert(name.to_string(), decode_value(item, &expected, special)?);
            Ok(true)
        })?;
        self.fields.extend(decoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::{NoSpecials, TimestampCodec};
    use crate::value::SetKind;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn encode(value: &DocValue) -> Result<Value> {
        let mut builder = TreeBuilder::new();
        encode_value(value, &mut builder, &TimestampCodec)?;
        builder.finish()
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode(&DocValue::Null).unwrap(), Value::Null);
        assert_eq!(encode(&DocValue::from(7i64)).unwrap(), Value::Int(7));
        assert_eq!(encode(&DocValue::from(999u64)).unwrap(), Value::Uint(999));
        assert_eq!(encode(&DocValue::from("")).unwrap(), Value::Null);
        assert_eq!(
            encode(&DocValue::Complex(12.0, 37.0)).unwrap(),
            Value::Complex { re: 12.0, im: 37.0 }
        );
    }

    #[test]
    fn test_encode_nested() {
        let mut inner = BTreeMap::new();
        inner.insert("a".to_string(), DocValue::Int(1));
        let value = DocValue::List(vec![DocValue::Map(inner), DocValue::Bool(true)]);

        let mut expected = HashMap::new();
        expected.insert("a".to_string(), Value::Int(1));
        assert_eq!(
            encode(&value).unwrap(),
            Value::List(vec![Value::Map(expected), Value::Bool(true)])
        );
    }

    #[test]
    fn test_timestamp_without_specials_has_no_encoding() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut builder = TreeBuilder::new();
        let err =
            encode_value(&DocValue::Timestamp(ts), &mut builder, &NoSpecials).unwrap_err();
        assert_eq!(err, CodecError::NoEncoding("timestamp"));
        assert!(err.is_invalid_argument());
    }

    struct Silent;

    impl SpecialCodec for Silent {
        fn encode_special(&self, _: &DocValue, _: &mut dyn ValueObserver) -> Result<bool> {
            Ok(true)
        }

        fn decode_special(&self, _: &FieldType, _: &dyn DecodeDriver) -> Result<Option<DocValue>> {
            Ok(None)
        }
    }

    #[test]
    fn test_special_that_encodes_nothing_fails() {
        let mut builder = TreeBuilder::new();
        let err = encode_value(&DocValue::Int(1), &mut builder, &Silent).unwrap_err();
        assert_eq!(err, CodecError::SpecialNotEncoded("int64"));
    }

    #[test]
    fn test_decode_null_into_scalars() {
        let null = Value::Null;
        let cases = [
            (FieldType::String, DocValue::String(String::new())),
            (FieldType::Int, DocValue::Int(0)),
            (FieldType::Uint, DocValue::Uint(0)),
            (FieldType::Float, DocValue::Float(0.0)),
            (FieldType::Bool, DocValue::Bool(false)),
            (FieldType::Complex, DocValue::Complex(0.0, 0.0)),
            (FieldType::Bytes, DocValue::Null),
            (FieldType::Any, DocValue::Null),
        ];
        for (ty, want) in cases {
            assert_eq!(
                decode_value(&null, &ty, &NoSpecials).unwrap(),
                want,
                "{:?}",
                ty
            );
        }
    }

    #[test]
    fn test_decode_int_into_uint() {
        let got = decode_value(&Value::Int(7), &FieldType::Uint, &NoSpecials).unwrap();
        assert_eq!(got, DocValue::Uint(7));
    }

    #[test]
    fn test_decode_complex_vs_generic() {
        let node = Value::List(vec![Value::Int(12), Value::Int(37)]);
        assert_eq!(
            decode_value(&node, &FieldType::Complex, &NoSpecials).unwrap(),
            DocValue::Complex(12.0, 37.0)
        );
        assert_eq!(
            decode_value(&node, &FieldType::Any, &NoSpecials).unwrap(),
            DocValue::List(vec![DocValue::Int(12), DocValue::Int(37)])
        );
    }

    #[test]
    fn test_decode_typed_list() {
        let node = Value::List(vec![Value::Int(12), Value::Int(37)]);
        let ty = FieldType::List(Box::new(FieldType::Float));
        assert_eq!(
            decode_value(&node, &ty, &NoSpecials).unwrap(),
            DocValue::List(vec![DocValue::Float(12.0), DocValue::Float(37.0)])
        );
    }

    #[test]
    fn test_decode_set_always_fails() {
        let set = Value::Unsupported(SetKind::BinarySet);
        for ty in [
            FieldType::Any,
            FieldType::Bytes,
            FieldType::List(Box::new(FieldType::Bytes)),
            FieldType::Timestamp,
        ] {
            let err = decode_value(&set, &ty, &TimestampCodec).unwrap_err();
            assert!(err.is_unsupported(), "{:?}: {:?}", ty, err);
        }
    }

    #[test]
    fn test_decode_timestamp_without_specials_is_mismatch() {
        let err = decode_value(&Value::from("x"), &FieldType::Timestamp, &NoSpecials).unwrap_err();
        assert_eq!(err, CodecError::mismatch("timestamp", "string"));
    }

    #[test]
    fn test_record_get_field() {
        let record = Record::new().with("id", "abc");
        assert_eq!(record.get_field("id").unwrap(), DocValue::from("abc"));
        assert!(record.get_field("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_record_round_trip_through_tree() {
        let record = Record::new()
            .with("id", "abc")
            .with("count", 3i64)
            .with("empty", "");

        let tree = encode_document(&record, &NoSpecials).unwrap();
        assert_eq!(tree.as_map().unwrap().get("empty"), Some(&Value::Null));

        let mut out = Record::new()
            .with_type("count", FieldType::Uint)
            .with_type("empty", FieldType::String);
        decode_document(&tree, &mut out, &NoSpecials).unwrap();

        assert_eq!(out.get("id"), Some(&DocValue::from("abc")));
        assert_eq!(out.get("count"), Some(&DocValue::Uint(3)));
        assert_eq!(out.get("empty"), Some(&DocValue::from("")));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_record_decode_requires_map() {
        let mut out = Record::new();
        let err = decode_document(&Value::Int(1), &mut out, &NoSpecials).unwrap_err();
        assert_eq!(err, CodecError::mismatch("map", "int64"));
        assert!(out.is_empty());
    }
}
