//! Tree to wire rendering
//!
//! One recursive walk over [`Value`], instantiated per wire variant through
//! [`WireSink`]. Rendering either produces the whole subtree or fails; no
//! partially built attribute escapes.

use std::collections::HashMap;

use dynadoc_core::{CodecError, Result, Value};
use tracing::trace;

use crate::number::{format_float, format_int, format_uint};
use crate::sink::WireSink;
use crate::{v1, v2};

/// Render a tagged-value tree as one wire attribute
pub fn render<A: WireSink>(value: &Value) -> Result<A> {
    Ok(match value {
        Value::Null => A::null(),
        Value::Bool(b) => A::boolean(*b),
        Value::Int(i) => A::number(format_int(*i)),
        Value::Uint(u) => A::number(format_uint(*u)),
        Value::Float(f) => A::number(format_float(*f)),
        Value::Bytes(b) => A::binary(b.clone()),
        Value::String(s) if s.is_empty() => A::null(),
        Value::String(s) => A::string(s.clone()),
        Value::Complex { re, im } => A::list(vec![
            A::number(format_float(*re)),
            A::number(format_float(*im)),
        ]),
        Value::List(items) => A::list(items.iter().map(render).collect::<Result<Vec<_>>>()?),
        Value::Map(entries) => A::map(render_entries(entries)?),
        Value::Unsupported(_) => {
            return Err(CodecError::UnknownKind {
                kind: value.kind(),
            })
        }
    })
}

/// Render a map root as a provider item
pub fn render_map<A: WireSink>(value: &Value) -> Result<HashMap<String, A>> {
    match value {
        Value::Map(entries) => {
            trace!(variant = A::VARIANT, fields = entries.len(), "render item");
            render_entries(entries)
        }
        other => Err(CodecError::NotAMap { kind: other.kind() }),
    }
}

fn render_entries<A: WireSink>(entries: &HashMap<String, Value>) -> Result<HashMap<String, A>> {
    entries
        .iter()
        .map(|(name, child)| Ok((name.clone(), render(child)?)))
        .collect()
}

/// Render as a first-generation attribute
pub fn encode_v1(value: &Value) -> Result<v1::AttributeValue> {
    render(value)
}

/// Render as a second-generation attribute
pub fn encode_v2(value: &Value) -> Result<v2::AttributeValue> {
    render(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynadoc_core::{Kind, SetKind};

    #[test]
    fn test_scalars_v1() {
        assert_eq!(encode_v1(&Value::Null).unwrap(), v1::NULL_VALUE);
        assert_eq!(
            encode_v1(&Value::Bool(true)).unwrap(),
            v1::AttributeValue::default().set_bool(true)
        );
        assert_eq!(
            encode_v1(&Value::Int(-3)).unwrap(),
            v1::AttributeValue::default().set_n("-3")
        );
        assert_eq!(
            encode_v1(&Value::Uint(u64::MAX)).unwrap(),
            v1::AttributeValue::default().set_n("18446744073709551615")
        );
        assert_eq!(
            encode_v1(&Value::Float(3.5)).unwrap(),
            v1::AttributeValue::default().set_n("3.5")
        );
        assert_eq!(
            encode_v1(&Value::from("abc")).unwrap(),
            v1::AttributeValue::default().set_s("abc")
        );
    }

    #[test]
    fn test_scalars_v2() {
        assert_eq!(
            encode_v2(&Value::Null).unwrap(),
            v2::AttributeValue::Null(true)
        );
        assert_eq!(
            encode_v2(&Value::Int(7)).unwrap(),
            v2::AttributeValue::N("7".into())
        );
        assert_eq!(
            encode_v2(&Value::Bytes(vec![])).unwrap(),
            v2::AttributeValue::B(vec![])
        );
    }

    #[test]
    fn test_empty_string_renders_null() {
        // Bypass the collapsing constructor to check the renderer's own guard
        let raw = Value::String(String::new());
        assert_eq!(encode_v1(&raw).unwrap(), v1::NULL_VALUE);
        assert_eq!(encode_v2(&raw).unwrap(), v2::AttributeValue::Null(true));
    }

    #[test]
    fn test_complex_renders_number_pair() {
        let value = Value::Complex { re: 12.0, im: 37.5 };
        assert_eq!(
            encode_v2(&value).unwrap(),
            v2::AttributeValue::L(vec![
                v2::AttributeValue::N("12".into()),
                v2::AttributeValue::N("37.5".into()),
            ])
        );
    }

    #[test]
    fn test_nested_structure() {
        let mut inner = HashMap::new();
        inner.insert("k".to_string(), Value::Int(1));
        let value = Value::List(vec![Value::Map(inner), Value::List(vec![])]);

        let rendered = encode_v1(&value).unwrap();
        let items = rendered.l.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].m.as_ref().unwrap()["k"],
            v1::AttributeValue::default().set_n("1")
        );
        assert_eq!(items[1].l, Some(vec![]));
    }

    #[test]
    fn test_unsupported_is_invalid_argument() {
        let value = Value::List(vec![
            Value::Int(1),
            Value::Unsupported(SetKind::StringSet),
        ]);
        let err = encode_v2(&value).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownKind {
                kind: Kind::Unsupported
            }
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_render_map_requires_map_root() {
        let err = render_map::<v1::AttributeValue>(&Value::Int(1)).unwrap_err();
        assert_eq!(err, CodecError::NotAMap { kind: Kind::Int64 });
        assert!(err.to_string().contains("not map"));

        let mut entries = HashMap::new();
        entries.insert("a".to_string(), Value::Bool(false));
        let item = render_map::<v2::AttributeValue>(&Value::Map(entries)).unwrap();
        assert_eq!(item["a"], v2::AttributeValue::Bool(false));
    }
}
