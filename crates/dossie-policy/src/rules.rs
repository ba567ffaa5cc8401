//! Individual decision rules
//!
//! Each rule maps one part of the audience signals to one decision field and
//! has an explicit default. [`explain`] reports which rules fell back to
//! their defaults.

use crate::decisions::{
    PricingStrategy, Tone, DEFAULT_CHANNELS, DEFAULT_COMPOSERS, DEFAULT_DAY, DEFAULT_TIME,
    MAX_PRIORITY_COMPOSERS,
};
use dossie_in::{AudienceSignals, Channel, Composer};
use serde::{Deserialize, Serialize};

/// Where a decision field came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// Derived from an extracted signal
    Signal,
    /// Fixed fallback, no usable signal
    Default,
}

/// One rule evaluation, for display next to the decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTrace {
    /// Decision field the rule fills
    pub field: String,
    pub source: RuleSource,
    pub detail: String,
}

impl RuleTrace {
    fn new(field: &str, source: RuleSource, detail: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            source,
            detail: detail.into(),
        }
    }
}

pub fn show_window(signals: &AudienceSignals) -> String {
    let day = signals
        .preferred_day
        .map(|d| d.as_str())
        .unwrap_or(DEFAULT_DAY);
    let time = signals
        .preferred_time
        .map(|t| t.to_string())
        .unwrap_or_else(|| DEFAULT_TIME.to_string());
    format!("{} às {}", day, time)
}

pub fn priority_composers(signals: &AudienceSignals) -> Vec<Composer> {
    if signals.composer_preferences.is_empty() {
        return DEFAULT_COMPOSERS.to_vec();
    }
    signals
        .composer_preferences
        .ranked()
        .into_iter()
        .take(MAX_PRIORITY_COMPOSERS)
        .map(|(composer, _)| composer)
        .collect()
}

pub fn tone(signals: &AudienceSignals) -> Tone {
    if signals.age_range.is_some() {
        Tone::DynamicVisual
    } else {
        Tone::Tradition
    }
}

pub fn priority_channels(signals: &AudienceSignals) -> Vec<Channel> {
    if signals.channels.is_empty() {
        DEFAULT_CHANNELS.to_vec()
    } else {
        signals.channels.clone()
    }
}

pub fn pricing_strategy(signals: &AudienceSignals) -> PricingStrategy {
    if signals.price_sensitive {
        PricingStrategy::HighlightDiscounts
    } else {
        PricingStrategy::ValueExperience
    }
}

/// Trace every rule against the signals
pub fn explain(signals: &AudienceSignals) -> Vec<RuleTrace> {
    let mut traces = Vec::with_capacity(6);

    traces.push(match signals.preferred_day {
        Some(day) => RuleTrace::new(
            "show_window.day",
            RuleSource::Signal,
            format!("dia preferido: {}", day),
        ),
        None => RuleTrace::new(
            "show_window.day",
            RuleSource::Default,
            format!("sem dia preferido, usando {}", DEFAULT_DAY),
        ),
    });

    traces.push(match signals.preferred_time {
        Some(time) => RuleTrace::new(
            "show_window.time",
            RuleSource::Signal,
            format!("horário preferido: {}", time),
        ),
        None => RuleTrace::new(
            "show_window.time",
            RuleSource::Default,
            format!("sem horário preferido, usando {}", DEFAULT_TIME),
        ),
    });

    traces.push(if signals.composer_preferences.is_empty() {
        RuleTrace::new(
            "priority_composers",
            RuleSource::Default,
            "sem preferências de compositor",
        )
    } else {
        let ranked = signals
            .composer_preferences
            .ranked()
            .iter()
            .map(|(c, p)| format!("{} {}%", c, p))
            .collect::<Vec<_>>()
            .join(", ");
        RuleTrace::new(
            "priority_composers",
            RuleSource::Signal,
            format!("ranking: {}", ranked),
        )
    });

    traces.push(match signals.age_range {
        Some(range) => {
            RuleTrace::new("tone", RuleSource::Signal, format!("faixa etária {}", range))
        }
        None => RuleTrace::new("tone", RuleSource::Default, "sem faixa etária"),
    });

    traces.push(if signals.channels.is_empty() {
        RuleTrace::new("priority_channels", RuleSource::Default, "nenhum canal citado")
    } else {
        RuleTrace::new(
            "priority_channels",
            RuleSource::Signal,
            format!("{} canal(is) citado(s)", signals.channels.len()),
        )
    });

    traces.push(if signals.price_sensitive {
        RuleTrace::new(
            "pricing_strategy",
            RuleSource::Signal,
            "público sensível a preço",
        )
    } else {
        RuleTrace::new("pricing_strategy", RuleSource::Default, "sem menção a preço")
    });

    traces
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossie_in::{AgeRange, ComposerPreferences, ShowTime, Weekday};

    #[test]
    fn test_show_window_partial_defaults() {
        let signals = AudienceSignals {
            preferred_time: ShowTime::new(19, 30),
            ..Default::default()
        };
        assert_eq!(show_window(&signals), "sábado às 19:30");

        let signals = AudienceSignals {
            preferred_day: Some(Weekday::Sexta),
            ..Default::default()
        };
        assert_eq!(show_window(&signals), "sexta às 20:00");
    }

    #[test]
    fn test_priority_composers_top_two() {
        let prefs: ComposerPreferences = [
            (Composer::Tchaikovsky, 10),
            (Composer::Adam, 60),
            (Composer::Prokofiev, 30),
        ]
        .into_iter()
        .collect();
        let signals = AudienceSignals {
            composer_preferences: prefs,
            ..Default::default()
        };
        assert_eq!(priority_composers(&signals), vec![Composer::Adam, Composer::Prokofiev]);
    }

    #[test]
    fn test_single_preference_not_padded() {
        let signals = AudienceSignals {
            composer_preferences: [(Composer::Glazunov, 5)].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(priority_composers(&signals), vec![Composer::Glazunov]);
    }

    #[test]
    fn test_explain_marks_sources() {
        let signals = AudienceSignals {
            age_range: AgeRange::new(18, 34),
            ..Default::default()
        };
        let traces = explain(&signals);
        let tone = traces.iter().find(|t| t.field == "tone").unwrap();
        assert_eq!(tone.source, RuleSource::Signal);
        let pricing = traces.iter().find(|t| t.field == "pricing_strategy").unwrap();
        assert_eq!(pricing.source, RuleSource::Default);
        assert_eq!(traces.len(), 6);
    }
}
