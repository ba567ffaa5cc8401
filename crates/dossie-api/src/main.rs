//! Binary entrypoint for the Dossie API server.
use anyhow::Context;
use dossie_api::{run, AppState};
use dossie_crew::{Crew, DossieConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("DOSSIE_CONFIG").ok();
    let config = DossieConfig::load(config_path.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let crew = Crew::from_config(&config).context("building dossier crew")?;
    tracing::info!(
        pipeline = crew.graph().pipeline_id(),
        generator = crew.generator().id(),
        "crew ready"
    );
    let state = AppState::new(crew).context("registering metrics")?;

    // Default listen address can be overridden with DOSSIE_ADDR
    let addr = std::env::var("DOSSIE_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    run(&addr, state).await.context("serving HTTP")?;
    Ok(())
}
