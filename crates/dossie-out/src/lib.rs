//! DOSSIE-OUT: Memory to Dossier Documents
//!
//! Renders the outputs of a dossier run into a Markdown document and a JSON
//! payload, and writes both to disk. Templates are handlebars loaded from
//! YAML; a default set is compiled into the crate.
//!
//! # Example
//!
//! ```
//! use dossie_core::Memory;
//! use dossie_out::{DossierAssembler, DossierExport};
//!
//! let memory: Memory = [("program", "Giselle, ato II")].into_iter().collect();
//! let assembler = DossierAssembler::builtin().unwrap();
//! let markdown = assembler.markdown(&DossierExport::from_memory(&memory)).unwrap();
//! assert!(markdown.starts_with("# Dossiê – Ballet Clássico"));
//! assert!(markdown.contains("## Programa\n\nGiselle, ato II"));
//! ```

pub mod export;
pub mod renderer;
pub mod templates;

pub use export::{DossierAssembler, DossierExport, DEFAULT_BASE_NAME};
pub use renderer::TemplateRenderer;
pub use templates::TemplatesFile;
