//! Dossier template files.
//!
//! A templates file is YAML with a version and named handlebars templates:
//!
//! ```yaml
//! version: "1.0"
//! templates:
//!   markdown:
//!     description: Full dossier document
//!     template: "# Dossiê\n\n{{program}}"
//! ```

use dossie_core::DossieError;
use serde::Deserialize;
use std::collections::HashMap;

/// Templates shipped with the crate
pub const BUILTIN_TEMPLATES: &str = include_str!("../templates/dossier.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, DossieError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DossieError::Configuration(format!("cannot read templates file {}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, DossieError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| DossieError::Configuration(format!("invalid templates YAML: {}", e)))
    }

    pub fn builtin() -> Result<Self, DossieError> {
        Self::from_yaml(BUILTIN_TEMPLATES)
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Template names, sorted
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
