use serde_json::Value;
use tracing::warn;

use swatch_core::error::{Error, Result};
use swatch_core::types::RawPolishRecord;

/// Status the backend puts on a successful `/polishes` response.
const STATUS_OK: &str = "okay";

/// Decodes a catalog document.
///
/// Accepts a bare array of records or the backend envelope
/// `{"status": "okay", "data": [...]}`. Array elements that are not record
/// objects are dropped; anything else about the document is an error.
pub fn parse_catalog(text: &str) -> Result<Vec<RawPolishRecord>> {
    let document: Value = serde_json::from_str(text)?;
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let status = map.get("status").and_then(Value::as_str).unwrap_or_default().to_string();
            if status != STATUS_OK {
                return Err(Error::Catalog(format!("unexpected response status {:?}", status)));
            }
            match map.remove("data") {
                Some(Value::Array(items)) => items,
                _ => return Err(Error::Catalog("response has no data array".into())),
            }
        }
        other => return Err(Error::Catalog(format!("expected an array or envelope, got {}", kind(&other)))),
    };

    let total = items.len();
    let records: Vec<RawPolishRecord> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if records.len() < total {
        warn!(dropped = total - records.len(), "skipped catalog entries that are not records");
    }
    Ok(records)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
