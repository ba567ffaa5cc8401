//! DOSSIE-IN: Audience Description to Structured Signals
//!
//! This crate turns a free-text audience description (typically Portuguese
//! marketing notes) into an [`AudienceSignals`] record using fixed pattern
//! rules. There is no language understanding here: every field is a regex or
//! substring match over a case-folded copy of the text.
//!
//! # Example
//!
//! ```
//! use dossie_in::{extract, Composer, Weekday};
//!
//! let signals = extract("40% Tchaikovsky, às 20h, sábado, 18–34, instagram");
//! assert_eq!(signals.composer_preferences.get(Composer::Tchaikovsky), Some(40));
//! assert_eq!(signals.preferred_day, Some(Weekday::Sabado));
//! assert_eq!(signals.preferred_time.unwrap().to_string(), "20:00");
//! ```

pub mod extractor;
pub mod normalizer;
pub mod signals;
pub mod vocabulary;

pub use extractor::extract;
pub use signals::{AgeRange, AudienceSignals, ComposerPreferences, ShowTime};
pub use vocabulary::{Channel, Composer, Weekday};
