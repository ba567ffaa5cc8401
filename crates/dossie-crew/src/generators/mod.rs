//! Generation service backends.

mod canned;
mod ollama;

pub use canned::CannedGenerator;
pub use ollama::OllamaGenerator;
