//! Task Graph Runner: executa as tarefas em ordem de declaração
use crate::data_model::{RunReport, TaskOutcome, TaskProof, TaskStatus};
use crate::error::DossieError;
use crate::generation::GenerationService;
use crate::memory::Memory;
use crate::task::Task;
use chrono::Utc;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, error, info};

/// Top-level task set file structure
#[derive(Debug, Deserialize)]
struct TaskSetFile {
    #[allow(dead_code)]
    version: String,
    tasks: Vec<Task>,
}

/// An ordered list of tasks executed in a single linear pass.
///
/// Declaration order must already respect dependencies; the runner never
/// reorders, retries or re-scans.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    pipeline_id: String,
}

impl TaskGraph {
    pub fn new(tasks: Vec<Task>) -> Self {
        let pipeline_id = tasks
            .iter()
            .map(|t| t.title())
            .collect::<Vec<_>>()
            .join("→");

        Self { tasks, pipeline_id }
    }

    /// Load and validate a task set from a YAML file
    pub fn load(path: &str) -> Result<Self, DossieError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DossieError::Configuration(format!("failed to read task set '{}': {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a task set from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, DossieError> {
        let file: TaskSetFile = serde_yaml::from_str(yaml)
            .map_err(|e| DossieError::Configuration(format!("invalid task set: {}", e)))?;
        Ok(Self::new(file.tasks))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(Task::output_key)
    }

    /// Run every task once, in order, writing outputs into `memory`.
    ///
    /// Tasks with an absent dependency are skipped. A generation failure
    /// aborts the pass; outputs written before it stay in memory.
    pub fn run(
        &self,
        memory: &mut Memory,
        generator: &dyn GenerationService,
    ) -> Result<RunReport, DossieError> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(self.tasks.len());

        info!(
            run_id = %run_id,
            pipeline = %self.pipeline_id,
            generator = generator.id(),
            "starting task graph"
        );

        for task in &self.tasks {
            let missing = memory.missing(task.dependencies());
            if !missing.is_empty() {
                debug!(task = task.title(), ?missing, "skipping task with unmet dependencies");
                outcomes.push(TaskOutcome {
                    title: task.title().to_string(),
                    output_key: task.output_key().to_string(),
                    status: TaskStatus::Skipped { missing },
                    proof: None,
                });
                continue;
            }

            let start = Instant::now();
            let body = task.template().render(memory)?;
            let prompt = task.owner().instruct(&body);

            let output = generator.generate(task.owner(), &prompt).map_err(|e| {
                error!(task = task.title(), error = %e, "generation failed");
                DossieError::Generation(e)
            })?;

            let proof = TaskProof {
                prompt_hash: hash_text(&prompt),
                output_hash: hash_text(&output),
                deterministic: generator.deterministic(),
                latency_ms: start.elapsed().as_millis() as u64,
            };

            info!(
                task = task.title(),
                role = %task.owner().name,
                key = task.output_key(),
                latency_ms = proof.latency_ms,
                "task executed"
            );

            memory.insert(task.output_key(), output);
            outcomes.push(TaskOutcome {
                title: task.title().to_string(),
                output_key: task.output_key().to_string(),
                status: TaskStatus::Executed,
                proof: Some(proof),
            });
        }

        Ok(RunReport {
            run_id,
            pipeline_id: self.pipeline_id.clone(),
            generator: generator.id().to_string(),
            started_at,
            outcomes,
        })
    }
}

fn hash_text(text: &str) -> String {
    format!("blake3:{}", blake3::hash(text.as_bytes()))
}
