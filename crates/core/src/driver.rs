//! Decode driver
//!
//! [`DecodeDriver`] is the read side of the codec: the document layer asks a
//! decoded node for the shape its destination expects. Accessors coerce
//! between numeric kinds, since the wire decoder always picks the narrowest
//! lossless numeric kind regardless of what was encoded.

use crate::error::{CodecError, Result};
use crate::value::{Kind, SetKind, Value};

/// Read accessors over one decoded node.
pub trait DecodeDriver {
    /// Kind tag of this node
    fn kind(&self) -> Kind;

    /// Whether this node is null
    fn as_null(&self) -> bool;

    /// Read as boolean
    fn as_bool(&self) -> Result<bool>;

    /// Read as signed integer, accepting either integer kind when in range
    fn as_int(&self) -> Result<i64>;

    /// Read as unsigned integer, accepting either integer kind when in range
    fn as_uint(&self) -> Result<u64>;

    /// Read as float, accepting any numeric kind
    fn as_float(&self) -> Result<f64>;

    /// Read as complex, from a complex node or a two-element numeric list
    fn as_complex(&self) -> Result<(f64, f64)>;

    /// Read as bytes
    fn as_bytes(&self) -> Result<&[u8]>;

    /// Read as text
    fn as_string(&self) -> Result<&str>;

    /// Number of list elements
    fn list_len(&self) -> Result<usize>;

    /// Visit list elements in order until `f` returns `false`
    fn decode_list(
        &self,
        f: &mut dyn FnMut(usize, &dyn DecodeDriver) -> Result<bool>,
    ) -> Result<()>;

    /// Number of map entries
    fn map_len(&self) -> Result<usize>;

    /// Visit map entries until `f` returns `false`
    fn decode_map(&self, f: &mut dyn FnMut(&str, &dyn DecodeDriver) -> Result<bool>) -> Result<()>;

    /// The rejected set kind, if this node is a provider set
    fn unsupported(&self) -> Option<SetKind>;
}

impl Value {
    fn reject(&self, expected: &'static str) -> CodecError {
        match self {
            Value::Unsupported(set) => CodecError::UnsupportedSet { set: *set },
            other => CodecError::mismatch(expected, other.kind().name()),
        }
    }
}

impl DecodeDriver for Value {
    fn kind(&self) -> Kind {
        Value::kind(self)
    }

    fn as_null(&self) -> bool {
        self.is_null()
    }

    fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.reject("bool")),
        }
    }

    fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Uint(u) => {
                i64::try_from(*u).map_err(|_| CodecError::mismatch("int64", "uint64"))
            }
            _ => Err(self.reject("int64")),
        }
    }

    fn as_uint(&self) -> Result<u64> {
        match self {
            Value::Uint(u) => Ok(*u),
            Value::Int(i) => {
                u64::try_from(*i).map_err(|_| CodecError::mismatch("uint64", "int64"))
            }
            _ => Err(self.reject("uint64")),
        }
    }

    fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            Value::Uint(u) => Ok(*u as f64),
            _ => Err(self.reject("float64")),
        }
    }

    fn as_complex(&self) -> Result<(f64, f64)> {
        match self {
            Value::Complex { re, im } => Ok((*re, *im)),
            Value::List(items) if items.len() == 2 => {
                let re = items[0].as_float()?;
                let im = items[1].as_float()?;
                Ok((re, im))
            }
            Value::List(_) => Err(CodecError::mismatch("two-element number list", "list")),
            _ => Err(self.reject("complex128")),
        }
    }

    fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Value::Bytes(b) => Ok(b),
            _ => Err(self.reject("bytes")),
        }
    }

    fn as_string(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.reject("string")),
        }
    }

    fn list_len(&self) -> Result<usize> {
        match self {
            Value::List(items) => Ok(items.len()),
            _ => Err(self.reject("list")),
        }
    }

    fn decode_list(
        &self,
        f: &mut dyn FnMut(usize, &dyn DecodeDriver) -> Result<bool>,
    ) -> Result<()> {
        let Value::List(items) = self else {
            return Err(self.reject("list"));
        };
        for (i, item) in items.iter().enumerate() {
            if !f(i, item)? {
                break;
            }
        }
        Ok(())
    }

    fn map_len(&self) -> Result<usize> {
        match self {
            Value::Map(entries) => Ok(entries.len()),
            _ => Err(self.reject("map")),
        }
    }

    fn decode_map(&self, f: &mut dyn FnMut(&str, &dyn DecodeDriver) -> Result<bool>) -> Result<()> {
        let Value::Map(entries) = self else {
            return Err(self.reject("map"));
        };
        for (key, value) in entries {
            if !f(key, value)? {
                break;
            }
        }
        Ok(())
    }

    fn unsupported(&self) -> Option<SetKind> {
        match self {
            Value::Unsupported(set) => Some(*set),
            _ => None,
        }
    }
}
