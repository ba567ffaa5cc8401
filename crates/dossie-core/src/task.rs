//! Task e Role: configuração estática das etapas do dossiê
use crate::error::DossieError;
use crate::generation::INSTRUCTION_SEPARATOR;
use crate::template::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named identity that owns tasks.
///
/// Roles are labels: they shape the instruction preamble but never decide
/// anything. Every role funnels through the same generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub responsibility: String,
    pub goal: String,
    pub background: String,
}

impl Role {
    pub fn new(
        name: impl Into<String>,
        responsibility: impl Into<String>,
        goal: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            responsibility: responsibility.into(),
            goal: goal.into(),
            background: background.into(),
        }
    }

    /// Role context rendered ahead of every task body
    pub fn preamble(&self) -> String {
        format!(
            "Agente: {}\nFunção: {}\nObjetivo: {}\nPerfil: {}",
            self.name, self.responsibility, self.goal, self.background
        )
    }

    /// Build the full instruction sent to the generation service
    pub fn instruct(&self, body: &str) -> String {
        format!("{}{}{}", self.preamble(), INSTRUCTION_SEPARATOR, body)
    }
}

/// Raw task definition as found in YAML task sets
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSpec {
    pub title: String,
    pub owner: Role,
    pub prompt_template: String,
    pub output_key: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// A validated task: every template placeholder is a declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskSpec")]
pub struct Task {
    title: String,
    owner: Role,
    prompt_template: PromptTemplate,
    output_key: String,
    #[serde(rename = "depends_on")]
    dependencies: BTreeSet<String>,
}

impl Task {
    /// Define a task, failing on template or dependency defects
    pub fn new<I, S>(
        title: impl Into<String>,
        owner: Role,
        prompt_template: &str,
        output_key: impl Into<String>,
        depends_on: I,
    ) -> Result<Self, DossieError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let title = title.into();
        let output_key = output_key.into();
        let dependencies: BTreeSet<String> = depends_on.into_iter().map(Into::into).collect();

        let prompt_template = PromptTemplate::parse(prompt_template).map_err(|e| {
            DossieError::Configuration(format!("task '{}': {}", title, e))
        })?;

        if output_key.trim().is_empty() {
            return Err(DossieError::Configuration(format!(
                "task '{}' has an empty output key",
                title
            )));
        }

        if dependencies.contains(&output_key) {
            return Err(DossieError::Configuration(format!(
                "task '{}' depends on its own output key '{}'",
                title, output_key
            )));
        }

        let undeclared: Vec<&str> = prompt_template
            .slot_names()
            .iter()
            .filter(|slot| !dependencies.contains(*slot))
            .map(String::as_str)
            .collect();

        if !undeclared.is_empty() {
            return Err(DossieError::Configuration(format!(
                "task '{}' template references undeclared keys: {}",
                title,
                undeclared.join(", ")
            )));
        }

        Ok(Task {
            title,
            owner,
            prompt_template,
            output_key,
            dependencies,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn owner(&self) -> &Role {
        &self.owner
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.prompt_template
    }

    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }
}

impl TryFrom<TaskSpec> for Task {
    type Error = DossieError;

    fn try_from(spec: TaskSpec) -> Result<Self, Self::Error> {
        Task::new(
            spec.title,
            spec.owner,
            &spec.prompt_template,
            spec.output_key,
            spec.depends_on,
        )
    }
}
