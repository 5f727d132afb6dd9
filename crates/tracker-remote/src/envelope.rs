//! Content envelope: JSON document <-> base64 payload

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize a document to pretty-printed JSON and base64 it.
pub fn encode<T: Serialize + ?Sized>(document: &T) -> serde_json::Result<String> {
    let text = serde_json::to_string_pretty(document)?;
    Ok(BASE64.encode(text.as_bytes()))
}

/// Decode a base64 payload as UTF-8 JSON.
///
/// The remote wraps its base64 at 60 columns, so ASCII whitespace is
/// stripped before decoding.
pub fn decode<T: DeserializeOwned>(content: &str) -> Result<T, String> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid base64 content: {}", e))?;
    let text = String::from_utf8(bytes).map_err(|e| format!("content is not UTF-8: {}", e))?;
    serde_json::from_str(&text).map_err(|e| format!("content is not valid JSON: {}", e))
}
