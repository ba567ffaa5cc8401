//! Runtime configuration.
//!
//! YAML file (optional) plus environment overrides:
//!
//! | Variable | Field |
//! |---|---|
//! | `DOSSIE_GENERATOR` | `generator.backend` (`canned` or `ollama`) |
//! | `DOSSIE_OLLAMA_URL` | `generator.endpoint` |
//! | `DOSSIE_MODEL` | `generator.model` |

use crate::generators::{CannedGenerator, OllamaGenerator};
use crate::reference::reference_graph;
use dossie_core::{DossieError, GenerationService, TaskGraph};
use dossie_out::{DossierAssembler, TemplateRenderer};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_THEME: &str = "Espetáculos de Ballet Clássico";
pub const DEFAULT_MISSION: &str =
    "Gerar dossiê com programa, release, cronograma técnico, alinhados aos dados de público.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Canned,
    Ollama,
}

impl FromStr for Backend {
    type Err = DossieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "canned" => Ok(Backend::Canned),
            "ollama" => Ok(Backend::Ollama),
            other => Err(DossieError::Configuration(format!(
                "unknown generator backend: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub backend: Backend,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Canned,
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DossieConfig {
    pub generator: GeneratorConfig,
    /// YAML task set replacing the reference tasks
    pub tasks_path: Option<String>,
    /// YAML dossier templates replacing the built-in ones
    pub templates_path: Option<String>,
    pub theme: String,
    pub mission: String,
    pub log_level: String,
}

impl Default for DossieConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            tasks_path: None,
            templates_path: None,
            theme: DEFAULT_THEME.to_string(),
            mission: DEFAULT_MISSION.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl DossieConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, DossieError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| DossieError::Configuration(format!("invalid config: {}", e)))
    }

    /// Read the file if given, then apply environment overrides
    pub fn load(path: Option<&str>) -> Result<Self, DossieError> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    DossieError::Configuration(format!("cannot read config {}: {}", path, e))
                })?;
                Self::from_yaml(&content)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), DossieError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("DOSSIE_GENERATOR") {
            self.generator.backend = backend.parse()?;
        }
        if let Some(url) = lookup("DOSSIE_OLLAMA_URL") {
            self.generator.endpoint = url;
        }
        if let Some(model) = lookup("DOSSIE_MODEL") {
            self.generator.model = model;
        }
        Ok(())
    }

    pub fn build_generator(&self) -> Arc<dyn GenerationService> {
        match self.generator.backend {
            Backend::Canned => Arc::new(CannedGenerator::new()),
            Backend::Ollama => Arc::new(OllamaGenerator::new(
                self.generator.endpoint.clone(),
                self.generator.model.clone(),
                Duration::from_secs(self.generator.timeout_secs),
            )),
        }
    }

    pub fn build_graph(&self) -> Result<TaskGraph, DossieError> {
        match &self.tasks_path {
            Some(path) => TaskGraph::load(path),
            None => reference_graph(),
        }
    }

    pub fn build_assembler(&self) -> Result<DossierAssembler, DossieError> {
        let renderer = match &self.templates_path {
            Some(path) => TemplateRenderer::load(path)?,
            None => TemplateRenderer::builtin()?,
        };
        Ok(DossierAssembler::new(renderer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = DossieConfig::default();
        assert_eq!(config.generator.backend, Backend::Canned);
        assert_eq!(config.theme, DEFAULT_THEME);
        assert_eq!(config.build_generator().id(), "canned");
    }

    #[test]
    fn test_partial_yaml() {
        let config = DossieConfig::from_yaml(
            r#"
generator:
  backend: ollama
  model: mistral
log_level: debug
"#,
        )
        .unwrap();
        assert_eq!(config.generator.backend, Backend::Ollama);
        assert_eq!(config.generator.model, "mistral");
        assert_eq!(config.generator.endpoint, "http://localhost:11434");
        assert_eq!(config.mission, DEFAULT_MISSION);
        assert_eq!(config.build_generator().id(), "ollama:mistral");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(DossieConfig::from_yaml("generatr: {}").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DOSSIE_GENERATOR", "Ollama"),
            ("DOSSIE_OLLAMA_URL", "http://gpu:11434"),
            ("DOSSIE_MODEL", "qwen2"),
        ]
        .into_iter()
        .collect();
        let mut config = DossieConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.generator.backend, Backend::Ollama);
        assert_eq!(config.generator.endpoint, "http://gpu:11434");
        assert_eq!(config.generator.model, "qwen2");
    }

    #[test]
    fn test_bad_backend_override() {
        let mut config = DossieConfig::default();
        let err = config
            .apply_overrides(|k| (k == "DOSSIE_GENERATOR").then(|| "gpt".to_string()))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_example_file_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../dossie.example.yaml");
        let yaml = std::fs::read_to_string(path).unwrap();
        assert_eq!(DossieConfig::from_yaml(&yaml).unwrap(), DossieConfig::default());
    }

    #[test]
    fn test_missing_tasks_file() {
        let config = DossieConfig {
            tasks_path: Some("/nonexistent/tasks.yaml".to_string()),
            ..Default::default()
        };
        assert!(config.build_graph().unwrap_err().is_configuration());
    }
}
