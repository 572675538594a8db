//! JSON encoding
//!
//! [`JsonCodec`] is a plain value: pass one around, or use
//! [`JsonCodec::shared`] for the process-wide compact codec.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::JsonError;

static SHARED: JsonCodec = JsonCodec::new();

/// Serializes and parses JSON with fixed formatting options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec {
    /// Indent output across multiple lines
    pub pretty: bool,
}

impl JsonCodec {
    /// Compact output
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output
    pub const fn pretty_printed() -> Self {
        Self { pretty: true }
    }

    /// The process-wide compact codec
    pub fn shared() -> &'static JsonCodec {
        &SHARED
    }

    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, JsonError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    pub fn from_json<T: DeserializeOwned>(&self, json: &str) -> Result<T, JsonError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Independent copy of `value` made by a JSON round trip.
    ///
    /// Only serialized state survives; `#[serde(skip)]` fields come back
    /// as their defaults.
    pub fn deep_copy<T: Serialize + DeserializeOwned>(&self, value: &T) -> Result<T, JsonError> {
        let tree = serde_json::to_value(value)?;
        Ok(serde_json::from_value(tree)?)
    }
}

/// Encode any serializable value with the shared codec
pub trait ToJson {
    fn to_json(&self) -> Result<String, JsonError>;
}

impl<T: Serialize + ?Sized> ToJson for T {
    fn to_json(&self) -> Result<String, JsonError> {
        JsonCodec::shared().to_json(self)
    }
}
