//! Base64 serde adapters for binary attribute members
//!
//! The provider's JSON form carries `B` and `BS` members as standard base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serializer};

fn decode<E: serde::de::Error>(text: &str) -> Result<Vec<u8>, E> {
    STANDARD
        .decode(text)
        .map_err(|e| E::custom(format!("invalid base64: {}", e)))
}

/// `Vec<u8>` as one base64 string
pub mod bytes {
    use super::*;

    /// Serialize
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    /// Deserialize
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode(&text)
    }
}

/// `Vec<Vec<u8>>` as a list of base64 strings
pub mod seq {
    use super::*;

    /// Serialize
    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(items.iter().map(|b| STANDARD.encode(b)))
    }

    /// Deserialize
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|text| decode(text))
            .collect()
    }
}

/// `Option<Vec<u8>>` as an optional base64 string
pub mod option {
    use super::*;

    /// Serialize
    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => serializer.serialize_some(&STANDARD.encode(b)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| decode(&text))
            .transpose()
    }
}

/// `Option<Vec<Vec<u8>>>` as an optional list of base64 strings
pub mod option_seq {
    use super::*;

    /// Serialize
    pub fn serialize<S: Serializer>(
        items: &Option<Vec<Vec<u8>>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match items {
            Some(items) => {
                let encoded: Vec<String> = items.iter().map(|b| STANDARD.encode(b)).collect();
                serializer.serialize_some(&encoded)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<Vec<u8>>>, D::Error> {
        match Option::<Vec<String>>::deserialize(deserializer)? {
            Some(items) => items
                .iter()
                .map(|text| decode(text))
                .collect::<Result<Vec<_>, D::Error>>()
                .map(Some),
            None => Ok(None),
        }
    }
}

