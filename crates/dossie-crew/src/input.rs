//! Audience input files.
//!
//! `.json` files are read for their `audience_raw` field (absent field reads
//! as empty text); any other file is taken verbatim as UTF-8 text.

use dossie_core::DossieError;
use std::path::Path;

use crate::keys::AUDIENCE_RAW;

pub fn load_audience(path: &Path) -> Result<String, DossieError> {
    if !path.is_file() {
        return Err(DossieError::MissingInput(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if !is_json {
        return Ok(content);
    }

    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        DossieError::Validation(format!("invalid JSON in {}: {}", path.display(), e))
    })?;

    match value.get(AUDIENCE_RAW) {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(DossieError::Validation(format!(
            "{} in {} must be a string",
            AUDIENCE_RAW,
            path.display()
        ))),
    }
}
