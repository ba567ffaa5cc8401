//! DOSSIE-CREW: the ballet dossier pipeline, assembled
//!
//! Wires the generic pieces together: the four reference roles and tasks,
//! the generation backends, runtime configuration and the session flow used
//! by the HTTP and console front ends.
//!
//! # Pipeline Flow
//!
//! ```text
//! texto → dossie-in → dossie-policy → Memory → TaskGraph → dossie-out
//!           ↓              ↓             ↓          ↓           ↓
//!       Signals       Decisions     seeded keys  program…   .md / .json
//! ```
//!
//! # Example
//!
//! ```
//! use dossie_crew::Crew;
//!
//! let crew = Crew::reference().unwrap();
//! let mut session = crew.session();
//! session.ingest("40% Tchaikovsky, 30% Minkus, às 20h, sábado").unwrap();
//! let report = session.generate().unwrap();
//! assert!(report.is_complete());
//! assert!(session.has_dossier());
//! ```

pub mod config;
pub mod generators;
pub mod input;
pub mod keys;
pub mod reference;
pub mod roles;
pub mod session;

pub use config::{Backend, DossieConfig, GeneratorConfig};
pub use generators::{CannedGenerator, OllamaGenerator};
pub use input::load_audience;
pub use reference::{reference_graph, reference_tasks};
pub use session::{Crew, DossierSession};
