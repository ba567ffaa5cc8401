//! The decisions record and its fixed vocabularies.

use dossie_in::{Channel, Composer};
use serde::{Deserialize, Serialize};

/// Default weekday when the audience gave none
pub const DEFAULT_DAY: &str = "sábado";

/// Default start time when the audience gave none
pub const DEFAULT_TIME: &str = "20:00";

/// Featured composers when no preference was expressed
pub const DEFAULT_COMPOSERS: [Composer; 2] = [Composer::Tchaikovsky, Composer::Minkus];

/// Channels used when the audience named none
pub const DEFAULT_CHANNELS: [Channel; 2] = [Channel::Instagram, Channel::Reels];

/// Maximum number of featured composers
pub const MAX_PRIORITY_COMPOSERS: usize = 2;

/// Programming and communication decisions for one audience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Decisions {
    /// "<day> às <HH:MM>"
    pub show_window: String,
    pub priority_composers: Vec<Composer>,
    pub tone: Tone,
    pub priority_channels: Vec<Channel>,
    pub pricing_strategy: PricingStrategy,
}

impl Decisions {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Communication tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// Chosen when the audience has a known age range
    #[serde(rename = "visual dinâmico, cortes rápidos e linguagem direta")]
    DynamicVisual,
    #[serde(rename = "linguagem acolhedora e foco em tradição")]
    Tradition,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::DynamicVisual => "visual dinâmico, cortes rápidos e linguagem direta",
            Tone::Tradition => "linguagem acolhedora e foco em tradição",
        }
    }
}

/// Pricing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingStrategy {
    /// Chosen for price-sensitive audiences
    #[serde(rename = "destacar meia-entrada/combos")]
    HighlightDiscounts,
    #[serde(rename = "valor artístico e experiência imersiva")]
    ValueExperience,
}

impl PricingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            PricingStrategy::HighlightDiscounts => "destacar meia-entrada/combos",
            PricingStrategy::ValueExperience => "valor artístico e experiência imersiva",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_serializes_as_text() {
        assert_eq!(
            serde_json::to_string(&Tone::Tradition).unwrap(),
            "\"linguagem acolhedora e foco em tradição\""
        );
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(serde_json::from_str::<PricingStrategy>("\"grátis\"").is_err());
    }
}
