//! Second-generation attribute value
//!
//! A tagged union with one variant per member kind, as the provider's second
//! client generation models it. Serialized externally tagged, so the JSON form
//! matches the first generation member for member.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sink::{WireSink, WireSource, WireView};
use dynadoc_core::SetKind;

/// An attribute value as a tagged union
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Binary
    #[serde(rename = "B", with = "crate::base64_serde::bytes")]
    B(Vec<u8>),

    /// Boolean
    #[serde(rename = "BOOL")]
    Bool(bool),

    /// Binary set
    #[serde(rename = "BS", with = "crate::base64_serde::seq")]
    Bs(Vec<Vec<u8>>),

    /// List
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),

    /// Map
    #[serde(rename = "M")]
    M(HashMap<String, AttributeValue>),

    /// Number as decimal text
    #[serde(rename = "N")]
    N(String),

    /// Number set
    #[serde(rename = "NS")]
    Ns(Vec<String>),

    /// Null marker
    #[serde(rename = "NULL")]
    Null(bool),

    /// String
    #[serde(rename = "S")]
    S(String),

    /// String set
    #[serde(rename = "SS")]
    Ss(Vec<String>),
}

impl WireSink for AttributeValue {
    const VARIANT: &'static str = "v2";

    fn null() -> Self {
        AttributeValue::Null(true)
    }

    fn boolean(value: bool) -> Self {
        AttributeValue::Bool(value)
    }

    fn number(text: String) -> Self {
        AttributeValue::N(text)
    }

    fn binary(bytes: Vec<u8>) -> Self {
        AttributeValue::B(bytes)
    }

    fn string(text: String) -> Self {
        AttributeValue::S(text)
    }

    fn list(items: Vec<Self>) -> Self {
        AttributeValue::L(items)
    }

    fn map(entries: HashMap<String, Self>) -> Self {
        AttributeValue::M(entries)
    }
}

impl WireSource for AttributeValue {
    const VARIANT: &'static str = "v2";

    fn view(&self) -> WireView<'_, Self> {
        match self {
            AttributeValue::Null(_) => WireView::Null,
            AttributeValue::Bool(b) => WireView::Bool(*b),
            AttributeValue::N(n) => WireView::Number(n),
            AttributeValue::B(b) => WireView::Binary(b),
            AttributeValue::S(s) => WireView::String(s),
            AttributeValue::L(l) => WireView::List(l),
            AttributeValue::M(m) => WireView::Map(m),
            AttributeValue::Ss(_) => WireView::Set(SetKind::StringSet),
            AttributeValue::Ns(_) => WireView::Set(SetKind::NumberSet),
            AttributeValue::Bs(_) => WireView::Set(SetKind::BinarySet),
        }
    }
}
