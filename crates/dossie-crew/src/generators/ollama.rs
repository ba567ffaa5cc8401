//! Ollama Generation Backend
//!
//! Blocking client for a local Ollama server (`POST /api/generate`, no
//! streaming). The HTTP client is built on first use so the generator can be
//! constructed inside an async runtime and only called from blocking workers.

use dossie_core::{GenerationError, GenerationService, Role};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub struct OllamaGenerator {
    /// Base URL (typically http://localhost:11434)
    endpoint: String,
    model: String,
    timeout: Duration,
    id: String,
    client: OnceCell<Client>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaGenerator {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let model = model.into();
        Self {
            id: format!("ollama:{}", model),
            endpoint,
            model,
            timeout,
            client: OnceCell::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> Result<&Client, GenerationError> {
        self.client.get_or_try_init(|| {
            Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| GenerationError::Unavailable(format!("HTTP client: {}", e)))
        })
    }
}

impl GenerationService for OllamaGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn deterministic(&self) -> bool {
        false
    }

    fn generate(&self, role: &Role, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.endpoint);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!(
            model = %self.model,
            role = %role.name,
            chars = prompt.len(),
            "ollama request"
        );

        let start = Instant::now();
        let response = self
            .client()?
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else if e.is_connect() {
                    GenerationError::Unavailable(format!(
                        "cannot connect to Ollama at {}",
                        self.endpoint
                    ))
                } else {
                    GenerationError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let msg = format!("Ollama API error ({}): {}", status, body.trim());
            return Err(if status.is_client_error() {
                GenerationError::Rejected(msg)
            } else {
                GenerationError::BadResponse(msg)
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GenerationError::BadResponse(format!("unreadable body: {}", e)))?;

        tracing::info!(
            model = %self.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "ollama response received"
        );

        if parsed.response.trim().is_empty() {
            return Err(GenerationError::BadResponse("empty response".to_string()));
        }
        Ok(parsed.response)
    }
}
