//! Dossier session: ingest audience data, optionally correct the extracted
//! signals, generate, export.

use crate::config::{DossieConfig, DEFAULT_MISSION, DEFAULT_THEME};
use crate::generators::CannedGenerator;
use crate::keys;
use crate::reference::reference_graph;
use dossie_core::{DossieError, GenerationService, Memory, RunReport, TaskGraph};
use dossie_in::AudienceSignals;
use dossie_out::{DossierAssembler, DossierExport};
use dossie_policy::Decisions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Immutable pipeline configuration shared by every session
#[derive(Clone)]
pub struct Crew {
    graph: Arc<TaskGraph>,
    generator: Arc<dyn GenerationService>,
    assembler: Arc<DossierAssembler>,
    theme: String,
    mission: String,
}

impl Crew {
    pub fn new(
        graph: TaskGraph,
        generator: Arc<dyn GenerationService>,
        assembler: DossierAssembler,
    ) -> Self {
        Self {
            graph: Arc::new(graph),
            generator,
            assembler: Arc::new(assembler),
            theme: DEFAULT_THEME.to_string(),
            mission: DEFAULT_MISSION.to_string(),
        }
    }

    /// Reference tasks, canned generator, built-in templates
    pub fn reference() -> Result<Self, DossieError> {
        Ok(Self::new(
            reference_graph()?,
            Arc::new(CannedGenerator::new()),
            DossierAssembler::builtin()?,
        ))
    }

    pub fn from_config(config: &DossieConfig) -> Result<Self, DossieError> {
        Ok(Self::new(
            config.build_graph()?,
            config.build_generator(),
            config.build_assembler()?,
        )
        .with_brief(config.theme.clone(), config.mission.clone()))
    }

    pub fn with_brief(mut self, theme: impl Into<String>, mission: impl Into<String>) -> Self {
        self.theme = theme.into();
        self.mission = mission.into();
        self
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn generator(&self) -> &dyn GenerationService {
        self.generator.as_ref()
    }

    pub fn assembler(&self) -> &DossierAssembler {
        &self.assembler
    }

    pub fn session(&self) -> DossierSession {
        DossierSession::new(self.clone())
    }
}

/// One audience, one memory.
pub struct DossierSession {
    crew: Crew,
    memory: Memory,
    signals: Option<AudienceSignals>,
    decisions: Option<Decisions>,
    report: Option<RunReport>,
}

impl DossierSession {
    pub fn new(crew: Crew) -> Self {
        Self {
            crew,
            memory: Memory::new(),
            signals: None,
            decisions: None,
            report: None,
        }
    }

    /// Extract and infer from raw text. Starts a fresh memory.
    pub fn ingest(&mut self, text: &str) -> Result<&Decisions, DossieError> {
        let signals = dossie_in::extract(text);
        self.memory = Memory::new();
        self.report = None;
        self.memory.insert(keys::AUDIENCE_RAW, text);
        info!(chars = text.len(), empty = signals.is_empty(), "audience ingested");
        self.store(signals)
    }

    /// Replace the signals with a manually edited JSON record.
    ///
    /// Nothing is modified when the JSON does not validate.
    pub fn apply_signals_json(&mut self, raw: &str) -> Result<&Decisions, DossieError> {
        if self.signals.is_none() {
            return Err(DossieError::MissingInput(
                "no audience data yet, ingest text first".to_string(),
            ));
        }
        let signals = AudienceSignals::from_json(raw).map_err(|e| {
            warn!(error = %e, "edited signals rejected");
            DossieError::Validation(format!("invalid audience JSON: {}", e))
        })?;
        info!("edited signals accepted");
        self.store(signals)
    }

    fn store(&mut self, signals: AudienceSignals) -> Result<&Decisions, DossieError> {
        let decisions = dossie_policy::infer(&signals);
        let signals_json = signals
            .to_pretty_json()
            .map_err(|e| DossieError::Serialize(e.to_string()))?;
        let decisions_json = decisions
            .to_pretty_json()
            .map_err(|e| DossieError::Serialize(e.to_string()))?;

        self.memory.insert(keys::AUDIENCE_SIGNALS, signals_json);
        self.memory.insert(keys::DECISIONS, decisions_json);
        self.memory.insert(keys::SHOW_WINDOW, decisions.show_window.clone());
        self.signals = Some(signals);
        Ok(&*self.decisions.insert(decisions))
    }

    /// Run the task graph over the session memory
    pub fn generate(&mut self) -> Result<RunReport, DossieError> {
        let missing: Vec<&str> = keys::GENERATION_PREREQUISITES
            .iter()
            .copied()
            .filter(|key| !self.memory.contains(key))
            .collect();
        if !missing.is_empty() {
            return Err(DossieError::MissingInput(format!(
                "missing {}: ingest audience data first",
                missing.join(", ")
            )));
        }

        self.memory.insert(keys::THEME, self.crew.theme.clone());
        self.memory.insert(keys::MISSION, self.crew.mission.clone());

        let report = self
            .crew
            .graph
            .run(&mut self.memory, self.crew.generator.as_ref())?;
        self.report = Some(report.clone());
        Ok(report)
    }

    pub fn signals(&self) -> Option<&AudienceSignals> {
        self.signals.as_ref()
    }

    pub fn decisions(&self) -> Option<&Decisions> {
        self.decisions.as_ref()
    }

    /// Pretty JSON of the current signals, as stored in memory
    pub fn signals_json(&self) -> Option<&str> {
        self.memory.get(keys::AUDIENCE_SIGNALS)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.report.as_ref()
    }

    /// Whether a program has been generated
    pub fn has_dossier(&self) -> bool {
        self.memory
            .get(keys::PROGRAM)
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn export(&self) -> DossierExport {
        DossierExport::from_memory(&self.memory)
    }

    pub fn markdown(&self) -> Result<String, DossieError> {
        self.crew.assembler.markdown(&self.export())
    }

    pub fn summary(&self) -> Result<String, DossieError> {
        self.crew.assembler.summary(&self.export())
    }

    pub fn save(&self, base: &Path) -> Result<(PathBuf, PathBuf), DossieError> {
        self.crew.assembler.save(&self.memory, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_before_ingest() {
        let mut session = Crew::reference().unwrap().session();
        let err = session.generate().unwrap_err();
        assert!(err.to_string().starts_with("INPUT/"));
        assert!(err.to_string().contains("audience_signals"));
    }

    #[test]
    fn test_edit_before_ingest() {
        let mut session = Crew::reference().unwrap().session();
        assert!(session.apply_signals_json("{}").is_err());
        assert!(session.memory().is_empty());
    }

    #[test]
    fn test_reingest_clears_outputs() {
        let mut session = Crew::reference().unwrap().session();
        session.ingest("40% Minkus").unwrap();
        session.generate().unwrap();
        assert!(session.has_dossier());

        session.ingest("domingo").unwrap();
        assert!(!session.has_dossier());
        assert!(session.last_report().is_none());
        assert_eq!(session.memory().get(keys::SHOW_WINDOW), Some("domingo às 20:00"));
    }
}
