use serde_json::Value;

use crate::error::{Error, Result};

/// Parse JSON text, keeping key order. On failure the error carries the
/// parser's message, its position, and the JSON path reached.
pub fn parse_json(src: &str) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_str(src);
    let value: Value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let path = err.path().to_string();
        Error::parse(err.inner(), path)
    })?;
    // trailing characters after a complete value
    de.end().map_err(|err| Error::parse(&err, ".".to_string()))?;
    Ok(value)
}

/// Re-indent JSON text without reordering keys.
pub fn format_json(src: &str) -> Result<String> {
    let value = parse_json(src)?;
    serde_json::to_string_pretty(&value).map_err(|err| Error::synthesis(err.to_string()))
}
