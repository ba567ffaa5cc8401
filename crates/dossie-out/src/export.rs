//! Dossier export: Markdown document, JSON payload and files on disk.

use dossie_core::{DossieError, Memory};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::renderer::TemplateRenderer;

/// Base file name used when none is given
pub const DEFAULT_BASE_NAME: &str = "dossie_ballet";

/// The exported subset of a run's memory. Absent keys are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DossierExport {
    pub program: String,
    pub press_release: String,
    pub technical_schedule: String,
    pub data_to_decisions: String,
    pub audience_raw: String,
    pub audience_signals: String,
    pub decisions: String,
    pub show_window: String,
}

impl DossierExport {
    pub fn from_memory(memory: &Memory) -> Self {
        let get = |key: &str| memory.get(key).unwrap_or_default().to_string();
        DossierExport {
            program: get("program"),
            press_release: get("press_release"),
            technical_schedule: get("technical_schedule"),
            data_to_decisions: get("data_to_decisions"),
            audience_raw: get("audience_raw"),
            audience_signals: get("audience_signals"),
            decisions: get("decisions"),
            show_window: get("show_window"),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, DossieError> {
        serde_json::to_string_pretty(self).map_err(|e| DossieError::Serialize(e.to_string()))
    }

    /// Template context: prose trimmed, structured blocks default to `{}`
    fn context(&self) -> Value {
        let block = |raw: &str| {
            if raw.is_empty() {
                "{}".to_string()
            } else {
                raw.to_string()
            }
        };
        let parsed = |raw: &str| serde_json::from_str::<Value>(raw).unwrap_or(Value::Null);

        json!({
            "program": self.program.trim(),
            "press_release": self.press_release.trim(),
            "technical_schedule": self.technical_schedule.trim(),
            "data_to_decisions": self.data_to_decisions.trim(),
            "audience_raw": self.audience_raw.trim(),
            "audience_signals": block(&self.audience_signals),
            "decisions": block(&self.decisions),
            "show_window": self.show_window,
            "parsed": {
                "signals": parsed(&self.audience_signals),
                "decisions": parsed(&self.decisions),
            },
        })
    }
}

/// Renders and saves dossiers
pub struct DossierAssembler {
    renderer: TemplateRenderer,
}

impl DossierAssembler {
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    pub fn builtin() -> Result<Self, DossieError> {
        Ok(Self::new(TemplateRenderer::builtin()?))
    }

    /// Full Markdown document, trimmed, with exactly one trailing newline
    pub fn markdown(&self, export: &DossierExport) -> Result<String, DossieError> {
        let rendered = self.renderer.render("markdown", &export.context())?;
        Ok(format!("{}\n", rendered.trim()))
    }

    /// Short overview of the decisions behind the dossier
    pub fn summary(&self, export: &DossierExport) -> Result<String, DossieError> {
        let rendered = self.renderer.render("summary", &export.context())?;
        Ok(rendered.trim_end().to_string())
    }

    /// Write `<base>.md` and `<base>.json`. Refuses before a program exists.
    pub fn save(&self, memory: &Memory, base: &Path) -> Result<(PathBuf, PathBuf), DossieError> {
        let export = DossierExport::from_memory(memory);
        if export.program.trim().is_empty() {
            return Err(DossieError::MissingInput(
                "no dossier generated yet, run generation first".to_string(),
            ));
        }

        let md_path = with_suffix(base, ".md");
        let json_path = with_suffix(base, ".json");

        std::fs::write(&md_path, self.markdown(&export)?)?;
        std::fs::write(&json_path, export.to_pretty_json()?)?;

        info!(
            markdown = %md_path.display(),
            json = %json_path.display(),
            "dossier saved"
        );
        Ok((md_path, json_path))
    }
}

/// Append a suffix without touching dots already in the file name
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_missing_keys_empty() {
        let memory: Memory = [("program", "P"), ("theme", "ignored")].into_iter().collect();
        let export = DossierExport::from_memory(&memory);
        assert_eq!(export.program, "P");
        assert_eq!(export.press_release, "");

        let json: Value = serde_json::from_str(&export.to_pretty_json().unwrap()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 8);
        assert!(json.get("theme").is_none());
    }

    #[test]
    fn test_with_suffix_keeps_dots() {
        assert_eq!(
            with_suffix(Path::new("out/v1.2"), ".md"),
            PathBuf::from("out/v1.2.md")
        );
    }
}
