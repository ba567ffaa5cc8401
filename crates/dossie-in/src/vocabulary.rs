//! Closed vocabularies recognised by the extractor.
//!
//! Declaration order matters: composers and channels are reported in the
//! order listed here, and day spellings are scanned in this order.

use serde::{Deserialize, Serialize};

/// Composers with a known repertoire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Composer {
    Tchaikovsky,
    Minkus,
    Adam,
    Prokofiev,
    Glazunov,
}

impl Composer {
    pub const ALL: [Composer; 5] = [
        Composer::Tchaikovsky,
        Composer::Minkus,
        Composer::Adam,
        Composer::Prokofiev,
        Composer::Glazunov,
    ];

    /// Title-case display name
    pub fn name(self) -> &'static str {
        match self {
            Composer::Tchaikovsky => "Tchaikovsky",
            Composer::Minkus => "Minkus",
            Composer::Adam => "Adam",
            Composer::Prokofiev => "Prokofiev",
            Composer::Glazunov => "Glazunov",
        }
    }

    /// Case-folded spelling searched for in text
    pub fn needle(self) -> &'static str {
        match self {
            Composer::Tchaikovsky => "tchaikovsky",
            Composer::Minkus => "minkus",
            Composer::Adam => "adam",
            Composer::Prokofiev => "prokofiev",
            Composer::Glazunov => "glazunov",
        }
    }
}

impl std::fmt::Display for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical weekday names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "segunda")]
    Segunda,
    #[serde(rename = "terça")]
    Terca,
    #[serde(rename = "quarta")]
    Quarta,
    #[serde(rename = "quinta")]
    Quinta,
    #[serde(rename = "sexta")]
    Sexta,
    #[serde(rename = "sábado")]
    Sabado,
    #[serde(rename = "domingo")]
    Domingo,
}

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Segunda => "segunda",
            Weekday::Terca => "terça",
            Weekday::Quarta => "quarta",
            Weekday::Quinta => "quinta",
            Weekday::Sexta => "sexta",
            Weekday::Sabado => "sábado",
            Weekday::Domingo => "domingo",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day spellings in scan order; accented and plain forms share a canonical day
pub const DAY_SPELLINGS: [(&str, Weekday); 9] = [
    ("segunda", Weekday::Segunda),
    ("terça", Weekday::Terca),
    ("terca", Weekday::Terca),
    ("quarta", Weekday::Quarta),
    ("quinta", Weekday::Quinta),
    ("sexta", Weekday::Sexta),
    ("sábado", Weekday::Sabado),
    ("sabado", Weekday::Sabado),
    ("domingo", Weekday::Domingo),
];

/// Communication channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Instagram,
    Reels,
    Tiktok,
    Youtube,
    Facebook,
    Whatsapp,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Instagram,
        Channel::Reels,
        Channel::Tiktok,
        Channel::Youtube,
        Channel::Facebook,
        Channel::Whatsapp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Instagram => "instagram",
            Channel::Reels => "reels",
            Channel::Tiktok => "tiktok",
            Channel::Youtube => "youtube",
            Channel::Facebook => "facebook",
            Channel::Whatsapp => "whatsapp",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substrings marking a price-sensitive audience
pub const PRICE_KEYWORDS: [&str; 6] =
    ["preço", "preco", "caro", "barato", "meia-entrada", "estudante"];
