//! Console entrypoint: `dossie extract | generate | tasks`.
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use dossie_crew::{keys, load_audience, Crew, DossieConfig, DossierSession};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_ref().map(|p| p.to_string_lossy().to_string());
    let config = DossieConfig::load(config_path.as_deref()).context("loading configuration")?;

    let level = cli.log.clone().unwrap_or_else(|| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    let crew = Crew::from_config(&config).context("building dossier crew")?;
    tracing::debug!(
        pipeline = crew.graph().pipeline_id(),
        generator = crew.generator().id(),
        "crew ready"
    );

    match cli.command {
        Commands::Extract { input, explain } => extract(&crew, input.as_deref(), explain),
        Commands::Generate {
            input,
            signals,
            out,
            print,
        } => generate(&crew, input.as_deref(), signals.as_deref(), &out, print),
        Commands::Tasks => {
            list_tasks(&crew);
            Ok(())
        }
    }
}

fn read_audience(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => load_audience(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading audience from stdin")?;
            Ok(text)
        }
    }
}

fn ingest(crew: &Crew, input: Option<&Path>) -> Result<DossierSession> {
    let text = read_audience(input)?;
    let mut session = crew.session();
    session.ingest(text.trim()).context("structuring audience data")?;
    Ok(session)
}

fn extract(crew: &Crew, input: Option<&Path>, explain: bool) -> Result<()> {
    let session = ingest(crew, input)?;

    println!("Audiência (Estruturado)");
    println!("{}", session.signals_json().unwrap_or("{}"));
    println!();
    println!("Implicações");
    println!("{}", session.memory().get(keys::DECISIONS).unwrap_or("{}"));

    if explain {
        if let Some(signals) = session.signals() {
            println!();
            for trace in dossie_policy::explain(signals) {
                println!("- {} [{:?}]: {}", trace.field, trace.source, trace.detail);
            }
        }
    }
    Ok(())
}

fn generate(
    crew: &Crew,
    input: Option<&Path>,
    signals: Option<&Path>,
    out: &Path,
    print: bool,
) -> Result<()> {
    let mut session = ingest(crew, input)?;

    if let Some(path) = signals {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading edited signals {}", path.display()))?;
        session
            .apply_signals_json(&raw)
            .with_context(|| format!("applying edited signals {}", path.display()))?;
    }

    let report = session.generate().context("generating dossier")?;
    for outcome in report.skipped() {
        eprintln!("tarefa pulada: {} ({:?})", outcome.title, outcome.status);
    }

    if print {
        print!("{}", session.markdown()?);
    } else {
        println!("= Dossiê – Ballet Clássico =");
        for (title, key) in [
            ("Programa", keys::PROGRAM),
            ("Release", keys::PRESS_RELEASE),
            ("Cronograma Técnico", keys::TECHNICAL_SCHEDULE),
            ("Relação entre Dados e Decisões", keys::DATA_TO_DECISIONS),
        ] {
            println!("\n{}:\n{}", title, session.memory().get(key).unwrap_or("(vazio)"));
        }
        println!("\n{}", session.summary()?);
    }

    let (md, json) = session.save(out).context("saving dossier")?;
    eprintln!("Arquivos salvos: {} e {}", md.display(), json.display());
    Ok(())
}

fn list_tasks(crew: &Crew) {
    let graph = crew.graph();
    println!("{}", graph.pipeline_id());
    for (i, task) in graph.tasks().iter().enumerate() {
        let deps: Vec<&str> = task.dependencies().iter().map(String::as_str).collect();
        println!(
            "{}. {} ({}) -> {} [{}]",
            i + 1,
            task.title(),
            task.owner().name,
            task.output_key(),
            deps.join(", ")
        );
    }
}
