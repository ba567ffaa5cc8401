//! Dossie Core: Memória, Tarefas, Runner e contrato de geração
//!
//! Núcleo genérico do pipeline de dossiê: uma memória chave→texto por
//! execução, tarefas estáticas com dependências declaradas e um runner de
//! passagem única que consulta o serviço de geração.

pub mod data_model;
pub mod error;
pub mod generation;
pub mod memory;
pub mod runner;
pub mod task;
pub mod template;

pub use data_model::{RunReport, TaskOutcome, TaskProof, TaskStatus};
pub use error::DossieError;
pub use generation::{GenerationError, GenerationService};
pub use memory::Memory;
pub use runner::TaskGraph;
pub use task::{Role, Task};
pub use template::PromptTemplate;

/// Versão do motor de dossiê
pub const DOSSIE_VERSION: &str = "1.0.0";
