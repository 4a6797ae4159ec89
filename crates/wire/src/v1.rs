//! First-generation attribute value
//!
//! One struct with a mutually-exclusive optional field per member kind, as
//! the provider's first client generation models it. At most one field is
//! expected to be populated; the decoder checks them in a fixed order
//! (`NULL`, `BOOL`, `N`, `B`, `S`, `L`, `M`, `SS`, `NS`, `BS`).
//!
//! ```
//! use dynadoc_wire::v1::AttributeValue;
//!
//! let av = AttributeValue::default().set_n("7");
//! assert_eq!(av.n.as_deref(), Some("7"));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sink::{WireSink, WireSource, WireView};
use dynadoc_core::SetKind;

/// The canonical null attribute
pub const NULL_VALUE: AttributeValue = AttributeValue {
    b: None,
    bool: None,
    bs: None,
    l: None,
    m: None,
    n: None,
    ns: None,
    null: Some(true),
    s: None,
    ss: None,
};

/// An attribute value with one optional field per member kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Binary
    #[serde(
        rename = "B",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::base64_serde::option"
    )]
    pub b: Option<Vec<u8>>,

    /// Boolean
    #[serde(rename = "BOOL", default, skip_serializing_if = "Option::is_none")]
    pub bool: Option<bool>,

    /// Binary set
    #[serde(
        rename = "BS",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::base64_serde::option_seq"
    )]
    pub bs: Option<Vec<Vec<u8>>>,

    /// List
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    pub l: Option<Vec<AttributeValue>>,

    /// Map
    #[serde(rename = "M", default, skip_serializing_if = "Option::is_none")]
    pub m: Option<HashMap<String, AttributeValue>>,

    /// Number as decimal text
    #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// Number set
    #[serde(rename = "NS", default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<Vec<String>>,

    /// Null marker
    #[serde(rename = "NULL", default, skip_serializing_if = "Option::is_none")]
    pub null: Option<bool>,

    /// String
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,

    /// String set
    #[serde(rename = "SS", default, skip_serializing_if = "Option::is_none")]
    pub ss: Option<Vec<String>>,
}

impl AttributeValue {
    /// Set the binary member
    pub fn set_b(mut self, b: impl Into<Vec<u8>>) -> Self {
        self.b = Some(b.into());
        self
    }

    /// Set the boolean member
    pub fn set_bool(mut self, b: bool) -> Self {
        self.bool = Some(b);
        self
    }

    /// Set the binary set member
    pub fn set_bs(mut self, bs: Vec<Vec<u8>>) -> Self {
        self.bs = Some(bs);
        self
    }

    /// Set the list member
    pub fn set_l(mut self, l: Vec<AttributeValue>) -> Self {
        self.l = Some(l);
        self
    }

    /// Set the map member
    pub fn set_m(mut self, m: HashMap<String, AttributeValue>) -> Self {
        self.m = Some(m);
        self
    }

    /// Set the number member
    pub fn set_n(mut self, n: impl Into<String>) -> Self {
        self.n = Some(n.into());
        self
    }

    /// Set the number set member
    pub fn set_ns(mut self, ns: Vec<String>) -> Self {
        self.ns = Some(ns);
        self
    }

    /// Set the null marker
    pub fn set_null(mut self, null: bool) -> Self {
        self.null = Some(null);
        self
    }

    /// Set the string member
    pub fn set_s(mut self, s: impl Into<String>) -> Self {
        self.s = Some(s.into());
        self
    }

    /// Set the string set member
    pub fn set_ss(mut self, ss: Vec<String>) -> Self {
        self.ss = Some(ss);
        self
    }
}

impl WireSink for AttributeValue {
    const VARIANT: &'static str = "v1";

    fn null() -> Self {
        NULL_VALUE
    }

    fn boolean(value: bool) -> Self {
        Self::default().set_bool(value)
    }

    fn number(text: String) -> Self {
        Self::default().set_n(text)
    }

    fn binary(bytes: Vec<u8>) -> Self {
        Self::default().set_b(bytes)
    }

    fn string(text: String) -> Self {
        Self::default().set_s(text)
    }

    fn list(items: Vec<Self>) -> Self {
        Self::default().set_l(items)
    }

    fn map(entries: HashMap<String, Self>) -> Self {
        Self::default().set_m(entries)
    }
}

impl WireSource for AttributeValue {
    const VARIANT: &'static str = "v1";

    fn view(&self) -> WireView<'_, Self> {
        if self.null.is_some() {
            WireView::Null
        } else if let Some(b) = self.bool {
            WireView::Bool(b)
        } else if let Some(n) = &self.n {
            WireView::Number(n)
        } else if let Some(b) = &self.b {
            WireView::Binary(b)
        } else if let Some(s) = &self.s {
            WireView::String(s)
        } else if let Some(l) = &self.l {
            WireView::List(l)
        } else if let Some(m) = &self.m {
            WireView::Map(m)
        } else if self.ss.is_some() {
            WireView::Set(SetKind::StringSet)
        } else if self.ns.is_some() {
            WireView::Set(SetKind::NumberSet)
        } else if self.bs.is_some() {
            WireView::Set(SetKind::BinarySet)
        } else {
            WireView::Empty
        }
    }
}
