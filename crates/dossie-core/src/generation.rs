//! Generation Service: contrato único do gerador de texto
use crate::task::Role;

/// Separates the role preamble from the task body inside an instruction.
pub const INSTRUCTION_SEPARATOR: &str = "\n---\n";

/// Text generation backend invoked once per executed task.
///
/// The runner treats it as a function of the instruction string: string in,
/// string out, or an explicit failure.
pub trait GenerationService: Send + Sync {
    /// Backend id (ex: "canned", "ollama:llama3.1")
    fn id(&self) -> &str;

    /// Whether identical instructions always yield identical text (default: true)
    fn deterministic(&self) -> bool {
        true
    }

    /// Generate text for a fully formatted instruction
    fn generate(&self, role: &Role, prompt: &str) -> Result<String, GenerationError>;
}

/// Splits an instruction built by [`Role::instruct`] back into its task body.
///
/// Returns the whole prompt when no preamble is present.
pub fn instruction_body(prompt: &str) -> &str {
    prompt
        .split_once(INSTRUCTION_SEPARATOR)
        .map(|(_, body)| body)
        .unwrap_or(prompt)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Backend could not be reached
    Unavailable(String),
    /// Backend did not answer in time
    Timeout,
    /// Backend answered with something unusable
    BadResponse(String),
    /// Backend refused the instruction
    Rejected(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "GEN/UNAVAILABLE: {}", msg),
            Self::Timeout => write!(f, "GEN/TIMEOUT"),
            Self::BadResponse(msg) => write!(f, "GEN/BAD_RESPONSE: {}", msg),
            Self::Rejected(msg) => write!(f, "GEN/REJECTED: {}", msg),
        }
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_body_strips_preamble() {
        let prompt = format!("Agente: X{}Curar Programa\nresto", INSTRUCTION_SEPARATOR);
        assert_eq!(instruction_body(&prompt), "Curar Programa\nresto");
    }

    #[test]
    fn test_instruction_body_without_preamble() {
        assert_eq!(instruction_body("just a body"), "just a body");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(GenerationError::Timeout.to_string(), "GEN/TIMEOUT");
        assert_eq!(
            GenerationError::Unavailable("down".into()).to_string(),
            "GEN/UNAVAILABLE: down"
        );
    }
}
