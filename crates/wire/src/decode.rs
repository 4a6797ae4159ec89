//! Wire to tree decoding
//!
//! [`parse`] materializes a whole [`Value`] tree from either wire variant.
//! [`WireDriver`] reads the wire attribute in place through the
//! [`DecodeDriver`] accessors, so a document can decode fields without an
//! intermediate tree.
//!
//! Set members are recognized and carried as [`Value::Unsupported`]; every
//! later read of them fails with [`CodecError::UnsupportedSet`].

use std::collections::HashMap;

use dynadoc_core::{CodecError, DecodeDriver, Kind, Result, SetKind, Value};
use tracing::trace;

use crate::number::parse_number;
use crate::sink::{WireSource, WireView};
use crate::{v1, v2};

/// Decode one wire attribute into a tagged-value tree
pub fn parse<A: WireSource>(attr: &A) -> Result<Value> {
    Ok(match attr.view() {
        WireView::Null => Value::Null,
        WireView::Bool(b) => Value::Bool(b),
        WireView::Number(text) => parse_number(text)?,
        WireView::Binary(b) => Value::Bytes(b.to_vec()),
        WireView::String(s) => Value::string(s),
        WireView::List(items) => Value::List(items.iter().map(parse).collect::<Result<_>>()?),
        WireView::Map(entries) => Value::Map(parse_entries(entries)?),
        WireView::Set(set) => {
            trace!(variant = A::VARIANT, %set, "set attribute kept as unsupported");
            Value::Unsupported(set)
        }
        WireView::Empty => return Err(CodecError::EmptyAttribute),
    })
}

/// Decode a provider item into a map node
pub fn parse_item<A: WireSource>(item: &HashMap<String, A>) -> Result<Value> {
    trace!(variant = A::VARIANT, fields = item.len(), "parse item");
    Ok(Value::Map(parse_entries(item)?))
}

fn parse_entries<A: WireSource>(entries: &HashMap<String, A>) -> Result<HashMap<String, Value>> {
    entries
        .iter()
        .map(|(name, attr)| Ok((name.clone(), parse(attr)?)))
        .collect()
}

/// Decode a first-generation attribute
pub fn decode_v1(attr: &v1::AttributeValue) -> Result<Value> {
    parse(attr)
}

/// Decode a second-generation attribute
pub fn decode_v2(attr: &v2::AttributeValue) -> Result<Value> {
    parse(attr)
}

/// Reads a wire attribute in place.
///
/// Numbers are parsed on each access using the same narrowing rule as
/// [`parse`]. An attribute with no member reports [`Kind::Unsupported`] and
/// fails every typed read with [`CodecError::EmptyAttribute`].
#[derive(Debug)]
pub struct WireDriver<'a, A> {
    attr: &'a A,
}

impl<'a, A: WireSource> WireDriver<'a, A> {
    /// Wrap one attribute
    pub fn new(attr: &'a A) -> Self {
        Self { attr }
    }

    fn reject(&self, expected: &'static str) -> CodecError {
        match self.attr.view() {
            WireView::Set(set) => CodecError::UnsupportedSet { set },
            WireView::Empty => CodecError::EmptyAttribute,
            _ => CodecError::mismatch(expected, self.kind().name()),
        }
    }

    fn number(&self, expected: &'static str) -> Result<Value> {
        match self.attr.view() {
            WireView::Number(text) => parse_number(text),
            _ => Err(self.reject(expected)),
        }
    }
}

impl<A: WireSource> DecodeDriver for WireDriver<'_, A> {
    fn kind(&self) -> Kind {
        match self.attr.view() {
            WireView::Null => Kind::Null,
            WireView::Bool(_) => Kind::Bool,
            // Malformed text surfaces on the typed read
            WireView::Number(text) => parse_number(text).map_or(Kind::Float64, |v| v.kind()),
            WireView::Binary(_) => Kind::Bytes,
            WireView::String(s) if s.is_empty() => Kind::Null,
            WireView::String(_) => Kind::String,
            WireView::List(_) => Kind::List,
            WireView::Map(_) => Kind::Map,
            WireView::Set(_) | WireView::Empty => Kind::Unsupported,
        }
    }

    fn as_null(&self) -> bool {
        match self.attr.view() {
            WireView::Null => true,
            WireView::String(s) => s.is_empty(),
            _ => false,
        }
    }

    fn as_bool(&self) -> Result<bool> {
        match self.attr.view() {
            WireView::Bool(b) => Ok(b),
            _ => Err(self.reject("bool")),
        }
    }

    fn as_int(&self) -> Result<i64> {
        self.number("int64")?.as_int()
    }

    fn as_uint(&self) -> Result<u64> {
        self.number("uint64")?.as_uint()
    }

    fn as_float(&self) -> Result<f64> {
        self.number("float64")?.as_float()
    }

    fn as_complex(&self) -> Result<(f64, f64)> {
        match self.attr.view() {
            WireView::List([re, im]) => Ok((
                WireDriver::new(re).as_float()?,
                WireDriver::new(im).as_float()?,
            )),
            WireView::List(_) => Err(CodecError::mismatch("two-element number list", "list")),
            _ => Err(self.reject("complex128")),
        }
    }

    fn as_bytes(&self) -> Result<&[u8]> {
        match self.attr.view() {
            WireView::Binary(b) => Ok(b),
            _ => Err(self.reject("bytes")),
        }
    }

    fn as_string(&self) -> Result<&str> {
        match self.attr.view() {
            WireView::String(s) if !s.is_empty() => Ok(s),
            _ => Err(self.reject("string")),
        }
    }

    fn list_len(&self) -> Result<usize> {
        match self.attr.view() {
            WireView::List(items) => Ok(items.len()),
            _ => Err(self.reject("list")),
        }
    }

    fn decode_list(
        &self,
        f: &mut dyn FnMut(usize, &dyn DecodeDriver) -> Result<bool>,
    ) -> Result<()> {
        let WireView::List(items) = self.attr.view() else {
            return Err(self.reject("list"));
        };
        for (i, item) in items.iter().enumerate() {
            if !f(i, &WireDriver::new(item))? {
                break;
            }
        }
        Ok(())
    }

    fn map_len(&self) -> Result<usize> {
        match self.attr.view() {
            WireView::Map(entries) => Ok(entries.len()),
            _ => Err(self.reject("map")),
        }
    }

    fn decode_map(&self, f: &mut dyn FnMut(&str, &dyn DecodeDriver) -> Result<bool>) -> Result<()> {
        let WireView::Map(entries) = self.attr.view() else {
            return Err(self.reject("map"));
        };
        for (key, item) in entries {
            if !f(key, &WireDriver::new(item))? {
                break;
            }
        }
        Ok(())
    }

    fn unsupported(&self) -> Option<SetKind> {
        match self.attr.view() {
            WireView::Set(set) => Some(set),
            _ => None,
        }
    }
}
