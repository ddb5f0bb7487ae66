//! Generic JSON and XML serialization adapters.
//!
//! Used both for request bodies (`with_json_body`/`with_xml_body`) and for
//! response parsing in the fetch wrappers. Errors are the underlying
//! decoder errors; the dispatch layer attaches status-code context.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encodes a value as a JSON string.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Decodes a value from JSON bytes.
pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Encodes a value as an XML string.
pub fn to_xml<T: Serialize>(value: &T) -> Result<String, quick_xml::SeError> {
    quick_xml::se::to_string(value)
}

/// Decodes a value from XML bytes.
pub fn from_xml<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, quick_xml::DeError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| quick_xml::DeError::Custom(format!("response body is not UTF-8: {e}")))?;
    quick_xml::de::from_str(text)
}
