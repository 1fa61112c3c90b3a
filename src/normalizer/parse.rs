//! Raw payload bytes to a generic document tree.

use serde_json::Value;

use super::NormalizeError;
use crate::model::{PayloadFormat, RawPayload};

/// Parses a payload into a JSON value tree whose root is a mapping.
///
/// # Errors
///
/// Returns [`NormalizeError::Parse`] for RDF payloads, invalid UTF-8,
/// syntax errors, and documents whose root is not a mapping.
pub fn parse_payload(payload: &RawPayload) -> Result<Value, NormalizeError> {
    let format = payload.format;
    let text = std::str::from_utf8(&payload.bytes)
        .map_err(|e| NormalizeError::parse(format, format!("payload is not UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let value: Value = match format {
        PayloadFormat::Json => {
            serde_json::from_str(text).map_err(|e| NormalizeError::parse(format, e))?
        }
        PayloadFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| NormalizeError::parse(format, e))?
        }
        PayloadFormat::Toml => toml::from_str(text).map_err(|e| NormalizeError::parse(format, e))?,
        PayloadFormat::Rdf => {
            return Err(NormalizeError::parse(
                format,
                "graph payloads cannot be read as a manifest",
            ));
        }
    };

    if value.is_object() {
        Ok(value)
    } else {
        Err(NormalizeError::parse(
            format,
            "expected a mapping at the top level",
        ))
    }
}
