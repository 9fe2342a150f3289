//! Serialization layer. Defaults to JSON via serde_json.
//!
//! Decoding is lenient in one specific way: records are decoded one at a
//! time, and when one is malformed the records before it are still returned
//! alongside the error.

use crate::customer::Customer;
use crate::error::{Error, Result};

/// Outcome of decoding a data file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Records decoded before the first failure, in file order.
    pub customers: Vec<Customer>,
    /// Why decoding stopped early, if it did.
    pub error: Option<Error>,
}

/// Converts the record list to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode records as a single document.
    fn serialize(&self, customers: &[Customer]) -> Result<Vec<u8>>;

    /// Decode a document, keeping whatever prefix decodes cleanly.
    fn deserialize(&self, bytes: &[u8]) -> Decoded;
}

/// JSON serializer with optional pretty-printing.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed JSON with indentation, easier to read by hand.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, customers: &[Customer]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(customers)
        } else {
            serde_json::to_vec(customers)
        };
        bytes.map_err(|e| Error::Serialize(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Decoded {
        let items = match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(serde_json::Value::Array(items)) => items,
            Ok(other) => {
                return Decoded {
                    customers: Vec::new(),
                    error: Some(Error::Parse(format!(
                        "expected a JSON array at top level, found {}",
                        kind_of(&other)
                    ))),
                }
            }
            Err(e) => {
                return Decoded {
                    customers: Vec::new(),
                    error: Some(Error::from(e)),
                }
            }
        };

        let mut decoded = Decoded {
            customers: Vec::with_capacity(items.len()),
            error: None,
        };
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<Customer>(item) {
                Ok(customer) => decoded.customers.push(customer),
                Err(e) => {
                    decoded.error = Some(Error::Parse(format!("record {index}: {e}")));
                    break;
                }
            }
        }
        decoded
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
