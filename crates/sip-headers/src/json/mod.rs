//! JSON envelope for headers.
//!
//! A header travels as `{"name": "<canonical name>", "value": "<rendered value>"}`
//! and an absent header as `null`. Decoding re-parses `"<name>: <value>"`, so
//! a header survives the trip exactly when it survives a wire round trip.
//!
//! ```rust
//! use rvoip_sip_headers::json::{from_json, to_json};
//! use rvoip_sip_headers::parse_header;
//!
//! let header = parse_header("Max-Forwards: 70").unwrap();
//! let bytes = to_json(Some(&header)).unwrap();
//! assert_eq!(bytes, br#"{"name":"Max-Forwards","value":"70"}"#);
//! assert_eq!(from_json(&bytes).unwrap(), Some(header));
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::parse_header;
use crate::types::headers::{HeaderName, TypedHeader};

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    name: String,
    value: String,
}

impl Envelope {
    fn of(header: &TypedHeader) -> Self {
        Envelope {
            name: header.canonical_name(),
            value: header.render_value(),
        }
    }

    fn decode(self) -> Result<TypedHeader> {
        parse_header(&format!("{}: {}", self.name, self.value)).map_err(|e| {
            debug!(header = %self.name, error = %e, "failed to decode JSON header envelope");
            e
        })
    }
}

/// Envelope from an already-parsed JSON value; `null` is an absent header
fn decode_value(value: Value) -> Result<Option<TypedHeader>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(mut map) => {
            let name = map.remove("name");
            let value = map.remove("value");
            match (name, value) {
                (Some(Value::String(name)), Some(Value::String(value))) => {
                    Envelope { name, value }.decode().map(Some)
                }
                _ => Err(not_envelope("object without string name and value")),
            }
        }
        other => Err(not_envelope(&format!("expected object, got {}", kind_of(&other)))),
    }
}

fn not_envelope(detail: &str) -> Error {
    debug!(detail, "JSON payload is not a header envelope");
    Error::NotHeaderEnvelope(detail.to_string())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Encodes a header as its JSON envelope, `None` as `null`
pub fn to_json(header: Option<&TypedHeader>) -> Result<Vec<u8>> {
    let bytes = match header {
        Some(h) => serde_json::to_vec(&Envelope::of(h))?,
        None => serde_json::to_vec(&Value::Null)?,
    };
    Ok(bytes)
}

/// Decodes a JSON envelope; `null` decodes to `None`
pub fn from_json(bytes: &[u8]) -> Result<Option<TypedHeader>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        debug!(error = %e, "invalid JSON header payload");
        Error::Json(e)
    })?;
    decode_value(value)
}

/// Decodes a JSON envelope that must hold an `expected` header
pub fn from_json_as(bytes: &[u8], expected: &HeaderName) -> Result<Option<TypedHeader>> {
    match from_json(bytes)? {
        Some(header) if header.name() != *expected => Err(Error::UnexpectedHeaderType {
            actual: header.canonical_name(),
            expected: expected.as_str().to_string(),
        }),
        decoded => Ok(decoded),
    }
}

impl Serialize for TypedHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Envelope::of(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypedHeader {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Envelope::deserialize(deserializer)?
            .decode()
            .map_err(D::Error::custom)
    }
}

/// `#[serde(with = "json::lenient")]` for `Option<TypedHeader>` fields
///
/// Anything that is not a header envelope decodes to `None` instead of
/// failing the surrounding structure. Envelopes that fail to parse are still
/// errors.
pub mod lenient {
    use serde::de::Error as _;

    use super::*;

    pub fn serialize<S: Serializer>(
        header: &Option<TypedHeader>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        header.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<TypedHeader>, D::Error> {
        match decode_value(Value::deserialize(deserializer)?) {
            Ok(header) => Ok(header),
            Err(e) if e.is_not_envelope() => Ok(None),
            Err(e) => Err(D::Error::custom(e)),
        }
    }
}
