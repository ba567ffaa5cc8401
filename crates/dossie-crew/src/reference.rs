//! Reference task set: program, press release, technical schedule and the
//! final data-to-decisions cross-check, in dependency order.

use crate::keys::*;
use crate::roles;
use dossie_core::{DossieError, Task, TaskGraph};

const CURATE_PROGRAM: &str = "\
Curar Programa: considerar preferências como referência.
Audiência:
{audience_signals}

Implicações:
{decisions}
";

const WRITE_RELEASE: &str = "\
Escrever Release: usar programa + audiência + implicações.
Programa:
{program}

Audiência:
{audience_signals}

Implicações:
{decisions}
";

const TECHNICAL_SCHEDULE_PROMPT: &str = "\
Cronograma Técnico: ajustar abertura para a janela recomendada.
Programa:
{program}
Janela: {show_window}

Audiência:
{audience_signals}

Implicações:
{decisions}
";

const RELATE: &str = "\
Relacionar: explique como dados -> decisões.
Dados brutos:
{audience_raw}

Audiência:
{audience_signals}

Implicações:
{decisions}

Programa:
{program}

Release:
{press_release}

Cronograma:
{technical_schedule}
";

pub fn reference_tasks() -> Result<Vec<Task>, DossieError> {
    Ok(vec![
        Task::new(
            "Curar Programa",
            roles::curator(),
            CURATE_PROGRAM,
            PROGRAM,
            [AUDIENCE_SIGNALS, DECISIONS],
        )?,
        Task::new(
            "Escrever Release",
            roles::writer(),
            WRITE_RELEASE,
            PRESS_RELEASE,
            [PROGRAM, AUDIENCE_SIGNALS, DECISIONS],
        )?,
        Task::new(
            "Cronograma Técnico",
            roles::technical_director(),
            TECHNICAL_SCHEDULE_PROMPT,
            TECHNICAL_SCHEDULE,
            [PROGRAM, AUDIENCE_SIGNALS, DECISIONS, SHOW_WINDOW],
        )?,
        Task::new(
            "Relacionar",
            roles::coherence_reviewer(),
            RELATE,
            DATA_TO_DECISIONS,
            [
                AUDIENCE_RAW,
                PROGRAM,
                PRESS_RELEASE,
                TECHNICAL_SCHEDULE,
                AUDIENCE_SIGNALS,
                DECISIONS,
            ],
        )?,
    ])
}

/// The reference pipeline
pub fn reference_graph() -> Result<TaskGraph, DossieError> {
    Ok(TaskGraph::new(reference_tasks()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_order() {
        let graph = reference_graph().unwrap();
        assert_eq!(
            graph.pipeline_id(),
            "Curar Programa→Escrever Release→Cronograma Técnico→Relacionar"
        );
        let keys: Vec<&str> = graph.output_keys().collect();
        assert_eq!(
            keys,
            vec![PROGRAM, PRESS_RELEASE, TECHNICAL_SCHEDULE, DATA_TO_DECISIONS]
        );
    }

    #[test]
    fn test_every_dependency_produced_upstream_or_seeded() {
        let graph = reference_graph().unwrap();
        let mut available = vec![AUDIENCE_RAW, AUDIENCE_SIGNALS, DECISIONS, SHOW_WINDOW];
        for task in graph.tasks() {
            for dep in task.dependencies() {
                assert!(available.contains(&dep.as_str()), "{} needs {}", task.title(), dep);
            }
            available.push(task.output_key());
        }
    }
}
