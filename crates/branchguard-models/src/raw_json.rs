//! Serde helpers for opaque JSON payloads kept as raw bytes.
//!
//! Payloads are embedded as JSON documents when they parse to anything but a
//! string. Other payloads, string literals included, are written as their raw
//! text, so every payload survives an export/import cycle.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) if !value.is_string() => value.serialize(serializer),
        _ => String::from_utf8_lossy(bytes).serialize(serializer),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s.into_bytes()),
        other => serde_json::to_vec(&other).map_err(serde::de::Error::custom),
    }
}
