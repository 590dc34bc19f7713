//! Storable values and byte coercions.

use crate::{Error, Result};
use serde::Serialize;

/// The closed set of primitives the facade stores.
///
/// Numbers are rendered as decimal text on the wire, so an `Int` written
/// through [`crate::Cache::store`] reads back through
/// [`crate::Cache::retrieve_int`] unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Render the value as the bytes handed to the store.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Value::Text(s) => s.into_bytes(),
            Value::Bytes(b) => b,
            Value::Int(i) => i.to_string().into_bytes(),
            Value::Float(f) => f.to_string().into_bytes(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

/// Coerce raw bytes to an integer (decimal text).
pub fn to_int(raw: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(raw).map_err(|e| Error::coercion("i64", e.to_string()))?;
    text.parse()
        .map_err(|e| Error::coercion("i64", format!("{text:?}: {e}")))
}

/// Coerce raw bytes to a float (decimal text).
pub fn to_float(raw: &[u8]) -> Result<f64> {
    let text = std::str::from_utf8(raw).map_err(|e| Error::coercion("f64", e.to_string()))?;
    text.parse()
        .map_err(|e| Error::coercion("f64", format!("{text:?}: {e}")))
}

/// Coerce raw bytes to UTF-8 text.
pub fn to_text(raw: &[u8]) -> Result<String> {
    String::from_utf8(raw.to_vec()).map_err(|e| Error::coercion("String", e.to_string()))
}
