use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::fmt;

use crate::errors::{Error, Result};
use crate::versioning::Kinds;

/// Ordered value model for key event dicts.
///
/// Insertion order must be preserved because the version string position
/// and digest inputs depend on it, so objects are IndexMap backed.
#[derive(Debug, Clone, PartialEq)]
pub enum KedValue {
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<KedValue>),
    Object(IndexMap<String, KedValue>),
}

/// Key event dict, an ordered mapping of labels to values
pub type Ked = IndexMap<String, KedValue>;

impl KedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<KedValue>> {
        match self {
            KedValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, KedValue>> {
        match self {
            KedValue::Object(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&str> for KedValue {
    fn from(s: &str) -> Self {
        KedValue::String(s.to_string())
    }
}

impl From<String> for KedValue {
    fn from(s: String) -> Self {
        KedValue::String(s)
    }
}

impl From<Vec<KedValue>> for KedValue {
    fn from(a: Vec<KedValue>) -> Self {
        KedValue::Array(a)
    }
}

impl Serialize for KedValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            KedValue::Bool(b) => serializer.serialize_bool(*b),
            KedValue::Number(n) => n.serialize(serializer),
            KedValue::String(s) => serializer.serialize_str(s),
            KedValue::Array(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for value in a {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            KedValue::Object(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (key, value) in m {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for KedValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KedVisitor;

        impl<'de> Visitor<'de> for KedVisitor {
            type Value = KedValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a key event value")
            }

            fn visit_bool<E>(self, v: bool) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(KedValue::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(KedValue::Number(v.into()))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(KedValue::Number(v.into()))
            }

            fn visit_f64<E>(self, v: f64) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Number::from_f64(v)
                    .map(KedValue::Number)
                    .ok_or_else(|| E::custom("invalid number"))
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(KedValue::String(v.to_string()))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(KedValue::String(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element()? {
                    values.push(value);
                }
                Ok(KedValue::Array(values))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut object = IndexMap::new();
                while let Some((key, value)) = map.next_entry::<String, KedValue>()? {
                    object.insert(key, value);
                }
                Ok(KedValue::Object(object))
            }
        }

        deserializer.deserialize_any(KedVisitor)
    }
}

/// Serializes ked to bytes of the given kind.
///
/// JSON uses compact separators with non-ASCII preserved; MGPK and CBOR use
/// their canonical byte outputs. Insertion order is preserved for all kinds.
pub fn dumps(ked: &Ked, kind: Kinds) -> Result<Vec<u8>> {
    match kind {
        Kinds::Json => serde_json::to_string(ked)
            .map(String::into_bytes)
            .map_err(|e| Error::Validation(format!("Error serializing JSON: {}", e))),
        Kinds::Mgpk => rmp_serde::to_vec(ked)
            .map_err(|e| Error::Validation(format!("Error serializing MGPK: {}", e))),
        Kinds::Cbor => serde_cbor::to_vec(ked)
            .map_err(|e| Error::Validation(format!("Error serializing CBOR: {}", e))),
    }
}

/// Deserializes raw bytes of the given kind into a ked
pub fn loads(raw: &[u8], kind: Kinds) -> Result<Ked> {
    match kind {
        Kinds::Json => {
            let text = std::str::from_utf8(raw)
                .map_err(|e| Error::Validation(format!("Invalid UTF-8 sequence: {}", e)))?;
            serde_json::from_str(text)
                .map_err(|e| Error::Validation(format!("Error deserializing JSON: {}", e)))
        }
        Kinds::Mgpk => rmp_serde::from_slice(raw)
            .map_err(|e| Error::Validation(format!("Error deserializing MGPK: {}", e))),
        Kinds::Cbor => serde_cbor::from_slice(raw)
            .map_err(|e| Error::Validation(format!("Error deserializing CBOR: {}", e))),
    }
}
