//! DOSSIE-POLICY: Signals to Decisions
//!
//! Deterministic rules that turn [`AudienceSignals`] into a [`Decisions`]
//! record: when to schedule, whom to feature, how to talk, where to publish
//! and how to frame the price.
//!
//! # Architecture
//!
//! ```text
//! AudienceSignals ─┬─ rules::show_window        ─┐
//!                  ├─ rules::priority_composers ─┤
//!                  ├─ rules::tone               ─┼─→ Decisions
//!                  ├─ rules::priority_channels  ─┤
//!                  └─ rules::pricing_strategy   ─┘
//! ```
//!
//! # Example
//!
//! ```
//! use dossie_in::extract;
//! use dossie_policy::{infer, Tone};
//!
//! let decisions = infer(&extract("40% Tchaikovsky, 30% Minkus, às 20h, sábado, 18–34"));
//! assert_eq!(decisions.show_window, "sábado às 20:00");
//! assert_eq!(decisions.tone, Tone::DynamicVisual);
//! ```

pub mod decisions;
pub mod rules;

pub use decisions::{Decisions, PricingStrategy, Tone};
pub use rules::{explain, RuleSource, RuleTrace};

use dossie_in::AudienceSignals;

/// Apply every rule to the signals. Pure and total.
pub fn infer(signals: &AudienceSignals) -> Decisions {
    Decisions {
        show_window: rules::show_window(signals),
        priority_composers: rules::priority_composers(signals),
        tone: rules::tone(signals),
        priority_channels: rules::priority_channels(signals),
        pricing_strategy: rules::pricing_strategy(signals),
    }
}
