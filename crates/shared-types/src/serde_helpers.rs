//! Serde adapters for the JSON wire format.
//!
//! Reporters and oracles are loose about numbers: counts, amounts and
//! identifiers arrive either as JSON numbers or as decimal strings. These
//! helpers accept both and always emit strings for 256-bit values.

use primitive_types::U256;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serializer};
use std::fmt;

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Map key serde_json uses to hand over a number in its source text.
const ARBITRARY_PRECISION_TOKEN: &str = "$serde_json::private::Number";

/// Number-or-string as its textual form.
struct TextualNumber;

impl<'de> Visitor<'de> for TextualNumber {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(serde_json::Number::from_f64(v)
            .map(|n| n.to_string())
            .unwrap_or_else(|| v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    /// Numbers too wide for `u64`/`f64` arrive as a single-entry map.
    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        match map.next_entry::<String, String>()? {
            Some((key, text)) if key == ARBITRARY_PRECISION_TOKEN => Ok(text),
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}

/// `U256` as a decimal string; accepts a JSON integer or a decimal string.
pub mod u256_dec {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let text = deserializer.deserialize_any(TextualNumber)?;
        crate::decimal::parse_integer(&text).map_err(de::Error::custom)
    }
}

/// `u64` from a JSON integer or a decimal string.
pub mod u64_flex {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let text = deserializer.deserialize_any(TextualNumber)?;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!("not an unsigned integer: {text}")));
        }
        text.parse::<u64>().map_err(de::Error::custom)
    }
}

/// Optional number-or-string kept in textual form for later strict parsing.
pub mod opt_textual {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(deserialize_with = "textual")] String);

        fn textual<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
            deserializer.deserialize_any(TextualNumber)
        }

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
    }
}

/// Byte vector as `0x`-prefixed lowercase hex.
pub mod hex_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(strip_hex_prefix(&text)).map_err(de::Error::custom)
    }
}

/// 32-byte array as `0x`-prefixed lowercase hex.
pub mod hex_hash {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }
}
