//! The audience-signal record produced by the extractor.
//!
//! Every field is range-checked on construction and on deserialization, so a
//! manually edited JSON record cannot smuggle in values the extractor would
//! never emit.

use crate::vocabulary::{Channel, Composer, Weekday};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Structured audience signals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudienceSignals {
    #[serde(default)]
    pub composer_preferences: ComposerPreferences,
    #[serde(default)]
    pub preferred_day: Option<Weekday>,
    #[serde(default)]
    pub preferred_time: Option<ShowTime>,
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    #[serde(default, deserialize_with = "unique_channels")]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub price_sensitive: bool,
}

impl AudienceSignals {
    /// Parse and validate a JSON record
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Pretty JSON, non-ASCII characters kept as-is
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// True when no field carries a signal
    pub fn is_empty(&self) -> bool {
        *self == AudienceSignals::default()
    }
}

// ============================================================================
// Composer preferences
// ============================================================================

/// Composer → percentage, in insertion order.
///
/// Serialized as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerPreferences(Vec<(Composer, u8)>);

impl ComposerPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a percentage, clamped to 100. Re-inserting keeps the original position.
    pub fn insert(&mut self, composer: Composer, percent: u8) {
        let percent = percent.min(100);
        match self.0.iter_mut().find(|(c, _)| *c == composer) {
            Some(entry) => entry.1 = percent,
            None => self.0.push((composer, percent)),
        }
    }

    pub fn get(&self, composer: Composer) -> Option<u8> {
        self.0.iter().find(|(c, _)| *c == composer).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Composer, u8)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Composers by descending percentage; ties keep insertion order
    pub fn ranked(&self) -> Vec<(Composer, u8)> {
        let mut ranked = self.0.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl FromIterator<(Composer, u8)> for ComposerPreferences {
    fn from_iter<T: IntoIterator<Item = (Composer, u8)>>(iter: T) -> Self {
        let mut prefs = ComposerPreferences::new();
        for (composer, percent) in iter {
            prefs.insert(composer, percent);
        }
        prefs
    }
}

impl Serialize for ComposerPreferences {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (composer, percent) in &self.0 {
            map.serialize_entry(composer, percent)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ComposerPreferences {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PrefsVisitor;

        impl<'de> Visitor<'de> for PrefsVisitor {
            type Value = ComposerPreferences;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of composer name to percentage (0-100)")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut prefs = ComposerPreferences::new();
                while let Some((composer, percent)) = access.next_entry::<Composer, u8>()? {
                    if percent > 100 {
                        return Err(de::Error::custom(format!(
                            "percentage {} for {} is out of range",
                            percent, composer
                        )));
                    }
                    if prefs.get(composer).is_some() {
                        return Err(de::Error::custom(format!("duplicate composer {}", composer)));
                    }
                    prefs.insert(composer, percent);
                }
                Ok(prefs)
            }
        }

        deserializer.deserialize_map(PrefsVisitor)
    }
}

// ============================================================================
// Show time
// ============================================================================

/// A valid wall-clock time, displayed as zero-padded `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShowTime {
    hour: u8,
    minute: u8,
}

impl ShowTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour <= 23 && minute <= 59 {
            Some(ShowTime { hour: hour as u8, minute: minute as u8 })
        } else {
            None
        }
    }
}

impl fmt::Display for ShowTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for ShowTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .filter(|(h, m)| h.len() == 2 && m.len() == 2)
            .ok_or_else(|| format!("time '{}' is not HH:MM", s))?;
        let hour: u32 = h.parse().map_err(|_| format!("invalid hour in '{}'", s))?;
        let minute: u32 = m.parse().map_err(|_| format!("invalid minute in '{}'", s))?;
        ShowTime::new(hour, minute).ok_or_else(|| format!("time '{}' is out of range", s))
    }
}

impl TryFrom<String> for ShowTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShowTime> for String {
    fn from(time: ShowTime) -> Self {
        time.to_string()
    }
}

// ============================================================================
// Age range
// ============================================================================

/// An inclusive age range with `0 < min <= max <= 120`, displayed as `min–max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgeRange {
    min: u8,
    max: u8,
}

impl AgeRange {
    pub const MAX_AGE: u32 = 120;

    pub fn new(min: u32, max: u32) -> Option<Self> {
        if 0 < min && min <= max && max <= Self::MAX_AGE {
            Some(AgeRange { min: min as u8, max: max as u8 })
        } else {
            None
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

impl std::str::FromStr for AgeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('–')
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| format!("age range '{}' has no dash", s))?;
        let min: u32 = a.trim().parse().map_err(|_| format!("invalid lower bound in '{}'", s))?;
        let max: u32 = b.trim().parse().map_err(|_| format!("invalid upper bound in '{}'", s))?;
        AgeRange::new(min, max).ok_or_else(|| format!("age range '{}' is out of bounds", s))
    }
}

impl TryFrom<String> for AgeRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgeRange> for String {
    fn from(range: AgeRange) -> Self {
        range.to_string()
    }
}

fn unique_channels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Channel>, D::Error> {
    let channels = Vec::<Channel>::deserialize(deserializer)?;
    for (i, channel) in channels.iter().enumerate() {
        if channels[..i].contains(channel) {
            return Err(de::Error::custom(format!("duplicate channel {}", channel)));
        }
    }
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_keep_insertion_order_in_json() {
        let prefs: ComposerPreferences =
            [(Composer::Minkus, 30), (Composer::Adam, 10), (Composer::Tchaikovsky, 40)]
                .into_iter()
                .collect();
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"Minkus":30,"Adam":10,"Tchaikovsky":40}"#);

        let back: ComposerPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn test_ranked_is_stable_on_ties() {
        let prefs: ComposerPreferences =
            [(Composer::Tchaikovsky, 20), (Composer::Minkus, 50), (Composer::Adam, 20)]
                .into_iter()
                .collect();
        let ranked: Vec<Composer> = prefs.ranked().into_iter().map(|(c, _)| c).collect();
        assert_eq!(ranked, vec![Composer::Minkus, Composer::Tchaikovsky, Composer::Adam]);
    }

    #[test]
    fn test_show_time_bounds() {
        assert_eq!(ShowTime::new(9, 5).unwrap().to_string(), "09:05");
        assert!(ShowTime::new(24, 0).is_none());
        assert!(ShowTime::new(23, 60).is_none());
        assert!("7:30".parse::<ShowTime>().is_err());
        assert_eq!("07:30".parse::<ShowTime>().unwrap(), ShowTime::new(7, 30).unwrap());
    }

    #[test]
    fn test_age_range_bounds() {
        assert_eq!(AgeRange::new(18, 34).unwrap().to_string(), "18–34");
        assert!(AgeRange::new(0, 10).is_none());
        assert!(AgeRange::new(40, 30).is_none());
        assert!(AgeRange::new(10, 121).is_none());
        assert_eq!("25-40".parse::<AgeRange>().unwrap(), AgeRange::new(25, 40).unwrap());
    }

    #[test]
    fn test_rejects_invalid_json_records() {
        assert!(AudienceSignals::from_json(r#"{"preferred_time": "25:00"}"#).is_err());
        assert!(AudienceSignals::from_json(r#"{"age_range": "50–20"}"#).is_err());
        assert!(AudienceSignals::from_json(r#"{"composer_preferences": {"Bach": 10}}"#).is_err());
        assert!(AudienceSignals::from_json(r#"{"composer_preferences": {"Adam": 101}}"#).is_err());
        assert!(AudienceSignals::from_json(r#"{"channels": ["reels", "reels"]}"#).is_err());
        assert!(AudienceSignals::from_json(r#"{"channels": ["myspace"]}"#).is_err());
        assert!(AudienceSignals::from_json(r#"{"unknown_field": 1}"#).is_err());
        assert!(AudienceSignals::from_json("not json").is_err());
    }

    #[test]
    fn test_partial_json_defaults_missing_fields() {
        let signals = AudienceSignals::from_json(r#"{"price_sensitive": true}"#).unwrap();
        assert!(signals.price_sensitive);
        assert!(signals.composer_preferences.is_empty());
        assert_eq!(signals.preferred_day, None);
    }
}
