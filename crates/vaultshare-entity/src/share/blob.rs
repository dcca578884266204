//! Serde adapter storing encrypted blobs as standard base64 strings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize an optional byte blob as an optional base64 string.
pub fn serialize<S>(blob: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match blob {
        Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional base64 string into an optional byte blob.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded: Option<String> = Option::deserialize(deserializer)?;
    encoded
        .map(|s| STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom))
        .transpose()
}
