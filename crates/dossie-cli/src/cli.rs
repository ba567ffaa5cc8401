//! Command-line interface for the dossier generator.
//!
//! - `extract`: audience text to signals and decisions
//! - `generate`: full dossier, saved as Markdown and JSON
//! - `tasks`: the configured task pipeline

use clap::{Parser, Subcommand};
use dossie_out::DEFAULT_BASE_NAME;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dossie", version, about = "Dossiê de espetáculos de ballet clássico")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "DOSSIE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (overrides the configured level; RUST_LOG wins over both)
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the structured audience signals and derived decisions
    Extract {
        /// Audience file (.txt/.md, or .json with an `audience_raw` field); stdin when absent
        input: Option<PathBuf>,

        /// Also print which rules fell back to defaults
        #[arg(long)]
        explain: bool,
    },

    /// Generate the dossier and save it
    Generate {
        /// Audience file (.txt/.md, or .json with an `audience_raw` field); stdin when absent
        input: Option<PathBuf>,

        /// Edited signals JSON applied before generation
        #[arg(long)]
        signals: Option<PathBuf>,

        /// Base name for the output files (without extension)
        #[arg(long, default_value = DEFAULT_BASE_NAME)]
        out: PathBuf,

        /// Print the Markdown dossier to stdout
        #[arg(long)]
        print: bool,
    },

    /// List the task pipeline
    Tasks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["dossie", "generate", "publico.txt"]);
        match cli.command {
            Commands::Generate {
                input, out, print, signals,
            } => {
                assert_eq!(input, Some(PathBuf::from("publico.txt")));
                assert_eq!(out, PathBuf::from("dossie_ballet"));
                assert!(!print);
                assert!(signals.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["dossie", "tasks", "--config", "dossie.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("dossie.yaml")));
    }
}
