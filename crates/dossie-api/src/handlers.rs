//! API Handlers
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use dossie_core::{DossieError, DOSSIE_VERSION};
use dossie_crew::DossierSession;
use dossie_in::AudienceSignals;
use dossie_out::DEFAULT_BASE_NAME;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::AppState;

/// Message returned when no audience text was sent
pub const EMPTY_AUDIENCE: &str = "Digite os dados do público.";

#[derive(Debug, Deserialize)]
pub struct AudienceRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DossierRequest {
    #[serde(default)]
    pub text: String,
    /// Edited signals applied after extraction
    #[serde(default)]
    pub signals: Option<Value>,
}

/// Errors surfaced to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Dossie(DossieError),
    Internal(String),
}

impl From<DossieError> for ApiError {
    fn from(err: DossieError) -> Self {
        ApiError::Dossie(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Dossie(err) => {
                let status = match &err {
                    DossieError::Validation(_) | DossieError::MissingInput(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    DossieError::Generation(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn required_text(text: &str) -> Result<String, ApiError> {
    if dossie_in::normalizer::is_blank(text) {
        return Err(ApiError::BadRequest(EMPTY_AUDIENCE.to_string()));
    }
    Ok(text.trim().to_string())
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": DOSSIE_VERSION,
            "generator": state.crew.generator().id(),
        })),
    )
}

pub async fn list_tasks(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let graph = state.crew.graph();
    (
        StatusCode::OK,
        Json(json!({
            "pipeline_id": graph.pipeline_id(),
            "tasks": graph.tasks(),
        })),
    )
}

pub async fn extract(Json(payload): Json<AudienceRequest>) -> Result<Json<Value>, ApiError> {
    let text = required_text(&payload.text)?;
    let signals = dossie_in::extract(&text);
    Ok(Json(json!({ "signals": signals })))
}

/// Body is an AudienceSignals record
pub async fn infer(Json(payload): Json<Value>) -> Result<Json<Value>, ApiError> {
    let signals: AudienceSignals = serde_json::from_value(payload)
        .map_err(|e| DossieError::Validation(format!("invalid audience JSON: {}", e)))?;
    let decisions = dossie_policy::infer(&signals);
    let rationale = dossie_policy::explain(&signals);
    Ok(Json(json!({ "decisions": decisions, "rationale": rationale })))
}

pub async fn dossier(
    State(state): State<AppState>,
    Json(payload): Json<DossierRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = run_dossier(&state, payload).await?;
    Ok(Json(json!({
        "report": session.last_report(),
        "dossier": session.export(),
        "markdown": session.markdown()?,
        "summary": session.summary()?,
    })))
}

pub async fn dossier_markdown(
    State(state): State<AppState>,
    Json(payload): Json<DossierRequest>,
) -> Result<Response, ApiError> {
    let session = run_dossier(&state, payload).await?;
    let body = session.markdown()?;
    Ok(attachment("text/markdown; charset=utf-8", "md", body))
}

pub async fn dossier_json(
    State(state): State<AppState>,
    Json(payload): Json<DossierRequest>,
) -> Result<Response, ApiError> {
    let session = run_dossier(&state, payload).await?;
    let body = session.export().to_pretty_json()?;
    Ok(attachment("application/json; charset=utf-8", "json", body))
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

fn attachment(content_type: &'static str, extension: &str, body: String) -> Response {
    let disposition = format!("attachment; filename={}.{}", DEFAULT_BASE_NAME, extension);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// Ingest, apply edits, generate. Runs on a blocking worker with its own memory.
async fn run_dossier(
    state: &AppState,
    payload: DossierRequest,
) -> Result<DossierSession, ApiError> {
    let text = required_text(&payload.text)?;
    let edited = payload.signals.map(|v| v.to_string());
    let crew = state.crew.clone();

    let result = tokio::task::spawn_blocking(move || -> Result<DossierSession, DossieError> {
        let mut session = crew.session();
        session.ingest(&text)?;
        if let Some(raw) = edited {
            session.apply_signals_json(&raw)?;
        }
        session.generate()?;
        Ok(session)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("generation worker: {}", e)))?;

    match result {
        Ok(session) => {
            if let Some(report) = session.last_report() {
                state.metrics.record_run(report);
            }
            Ok(session)
        }
        Err(err) => {
            if matches!(err, DossieError::Generation(_)) {
                state.metrics.record_generation_failure();
            }
            Err(err.into())
        }
    }
}
