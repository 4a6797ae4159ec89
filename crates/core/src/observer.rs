//! Value observer and tagged-value builder
//!
//! The document layer reports each value it walks through a
//! [`ValueObserver`]: one notification per primitive kind, plus two
//! structural builders that hand out nested observers for the children.
//! [`TreeBuilder`] is the observer that assembles those notifications into a
//! [`Value`] tree.
//!
//! ```
//! use dynadoc_core::{TreeBuilder, Value, ValueObserver};
//!
//! let mut builder = TreeBuilder::new();
//! let mut list = builder.encode_list(2);
//! list.index(0).encode_int(1);
//! list.index(1).encode_string("two");
//!
//! let value = builder.finish().unwrap();
//! assert_eq!(value, Value::List(vec![Value::Int(1), Value::from("two")]));
//! ```

use std::collections::HashMap;

use crate::error::{CodecError, Result};
use crate::value::Value;

/// Receives typed value notifications from the document layer.
///
/// Each observer stands for exactly one value slot. Calling a second
/// notification on the same slot replaces the first.
pub trait ValueObserver {
    /// Null
    fn encode_nil(&mut self);

    /// Boolean
    fn encode_bool(&mut self, x: bool);

    /// Signed integer
    fn encode_int(&mut self, x: i64);

    /// Unsigned integer
    fn encode_uint(&mut self, x: u64);

    /// Floating point
    fn encode_float(&mut self, x: f64);

    /// Byte sequence. Zero-length input still yields a bytes node.
    fn encode_bytes(&mut self, x: &[u8]);

    /// Text. The empty string is recorded as null.
    fn encode_string(&mut self, x: &str);

    /// Complex number
    fn encode_complex(&mut self, re: f64, im: f64);

    /// Begin a list of `len` elements, each filled by index.
    fn encode_list(&mut self, len: usize) -> ListBuilder<'_>;

    /// Begin a map of `len` entries, each filled by name.
    fn encode_map(&mut self, len: usize) -> MapBuilder<'_>;

    /// Whether any notification has reached this slot.
    fn is_encoded(&self) -> bool;
}

/// Builds a [`Value`] from observer notifications.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    node: Node,
}

#[derive(Debug, Default)]
enum Node {
    #[default]
    Unset,
    Ready(Value),
    List(Vec<TreeBuilder>),
    Map {
        len: usize,
        entries: HashMap<String, TreeBuilder>,
    },
}

impl TreeBuilder {
    /// Create an empty builder for one value slot.
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, value: Value) {
        self.node = Node::Ready(value);
    }

    /// Consume the builder and produce the finished tree.
    ///
    /// Fails with [`CodecError::Incomplete`] if this slot, any list slot, or
    /// any announced map entry was never encoded. A partial tree is never
    /// returned.
    pub fn finish(self) -> Result<Value> {
        match self.node {
            Node::Unset => Err(CodecError::Incomplete(
                "value slot was never encoded".to_string(),
            )),
            Node::Ready(value) => Ok(value),
            Node::List(slots) => {
                let mut items = Vec::with_capacity(slots.len());
                for (i, slot) in slots.into_iter().enumerate() {
                    let item = slot
                        .finish()
                        .map_err(|e| CodecError::Incomplete(format!("list index {}: {}", i, e)))?;
                    items.push(item);
                }
                Ok(Value::List(items))
            }
            Node::Map { len, entries } => {
                if entries.len() < len {
                    return Err(CodecError::Incomplete(format!(
                        "map announced {} entries, got {}",
                        len,
                        entries.len()
                    )));
                }
                let mut map = HashMap::with_capacity(entries.len());
                for (key, slot) in entries {
                    let value = slot
                        .finish()
                        .map_err(|e| CodecError::Incomplete(format!("map key {:?}: {}", key, e)))?;
                    map.insert(key, value);
                }
                Ok(Value::Map(map))
            }
        }
    }
}

impl ValueObserver for TreeBuilder {
    fn encode_nil(&mut self) {
        self.set(Value::Null);
    }

    fn encode_bool(&mut self, x: bool) {
        self.set(Value::Bool(x));
    }

    fn encode_int(&mut self, x: i64) {
        self.set(Value::Int(x));
    }

    fn encode_uint(&mut self, x: u64) {
        self.set(Value::Uint(x));
    }

    fn encode_float(&mut self, x: f64) {
        self.set(Value::Float(x));
    }

    fn encode_bytes(&mut self, x: &[u8]) {
        self.set(Value::Bytes(x.to_vec()));
    }

    fn encode_string(&mut self, x: &str) {
        self.set(Value::string(x));
    }

    fn encode_complex(&mut self, re: f64, im: f64) {
        self.set(Value::Complex { re, im });
    }

    fn encode_list(&mut self, len: usize) -> ListBuilder<'_> {
        let slots = std::iter::repeat_with(TreeBuilder::new).take(len).collect();
        self.node = Node::List(slots);
        match &mut self.node {
            Node::List(slots) => ListBuilder { slots },
            _ => unreachable!("node was just set to a list"),
        }
    }

    fn encode_map(&mut self, len: usize) -> MapBuilder<'_> {
        self.node = Node::Map {
            len,
            entries: HashMap::with_capacity(len),
        };
        match &mut self.node {
            Node::Map { entries, .. } => MapBuilder { entries },
            _ => unreachable!("node was just set to a map"),
        }
    }

    fn is_encoded(&self) -> bool {
        !matches!(self.node, Node::Unset)
    }
}

/// Fills the elements of a list by index.
pub struct ListBuilder<'a> {
    slots: &'a mut [TreeBuilder],
}

impl ListBuilder<'_> {
    /// Number of elements announced.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the list was announced with zero elements.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Observer for element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not below the announced length.
    pub fn index(&mut self, i: usize) -> &mut dyn ValueObserver {
        &mut self.slots[i]
    }
}

/// Fills the entries of a map by name.
pub struct MapBuilder<'a> {
    entries: &'a mut HashMap<String, TreeBuilder>,
}

impl MapBuilder<'_> {
    /// Observer for the entry named `key`.
    pub fn key(&mut self, key: &str) -> &mut dyn ValueObserver {
        self.entries.entry(key.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(f: impl FnOnce(&mut dyn ValueObserver)) -> Result<Value> {
        let mut builder = TreeBuilder::new();
        f(&mut builder);
        builder.finish()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(build(|o| o.encode_nil()).unwrap(), Value::Null);
        assert_eq!(build(|o| o.encode_bool(true)).unwrap(), Value::Bool(true));
        assert_eq!(build(|o| o.encode_int(-7)).unwrap(), Value::Int(-7));
        assert_eq!(build(|o| o.encode_uint(999)).unwrap(), Value::Uint(999));
        assert_eq!(build(|o| o.encode_float(3.5)).unwrap(), Value::Float(3.5));
        assert_eq!(
            build(|o| o.encode_complex(12.0, 37.0)).unwrap(),
            Value::Complex { re: 12.0, im: 37.0 }
        );
    }

    #[test]
    fn test_empty_string_is_null() {
        assert_eq!(build(|o| o.encode_string("")).unwrap(), Value::Null);
        assert_eq!(
            build(|o| o.encode_string("x")).unwrap(),
            Value::String("x".to_string())
        );
    }

    #[test]
    fn test_empty_bytes_tagged_as_bytes() {
        assert_eq!(build(|o| o.encode_bytes(&[])).unwrap(), Value::Bytes(vec![]));
    }

    #[test]
    fn test_list_preserves_order() {
        let value = build(|o| {
            let mut list = o.encode_list(3);
            assert_eq!(list.len(), 3);
            list.index(2).encode_int(3);
            list.index(0).encode_int(1);
            list.index(1).encode_int(2);
        })
        .unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_nested_map() {
        let value = build(|o| {
            let mut map = o.encode_map(2);
            map.key("a").encode_int(1);
            let mut inner = map.key("b").encode_list(1);
            inner.index(0).encode_bool(false);
        })
        .unwrap();

        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&Value::Int(1)));
        assert_eq!(map.get("b"), Some(&Value::List(vec![Value::Bool(false)])));
    }

    #[test]
    fn test_empty_structures() {
        let list = build(|o| {
            let list = o.encode_list(0);
            assert!(list.is_empty());
        })
        .unwrap();
        assert_eq!(list, Value::List(vec![]));

        let map = build(|o| {
            o.encode_map(0);
        })
        .unwrap();
        assert_eq!(map, Value::Map(HashMap::new()));
    }

    #[test]
    fn test_unset_slot_is_incomplete() {
        assert!(matches!(build(|_| {}), Err(CodecError::Incomplete(_))));
    }

    #[test]
    fn test_partial_list_is_incomplete() {
        let result = build(|o| {
            let mut list = o.encode_list(2);
            list.index(0).encode_int(1);
        });
        match result {
            Err(CodecError::Incomplete(msg)) => assert!(msg.contains("list index 1")),
            other => panic!("expected incomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_map_is_incomplete() {
        let result = build(|o| {
            let mut map = o.encode_map(2);
            map.key("only").encode_int(1);
        });
        assert!(matches!(result, Err(CodecError::Incomplete(_))));
    }

    #[test]
    fn test_is_encoded() {
        let mut builder = TreeBuilder::new();
        assert!(!builder.is_encoded());
        builder.encode_nil();
        assert!(builder.is_encoded());
    }

    #[test]
    fn test_last_notification_wins() {
        let value = build(|o| {
            o.encode_int(1);
            o.encode_string("replaced");
        })
        .unwrap();
        assert_eq!(value, Value::from("replaced"));
    }
}
