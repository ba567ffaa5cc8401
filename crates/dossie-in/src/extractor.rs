//! Signal extraction for DOSSIE-IN.
//!
//! Extracts structured audience signals from text:
//! - Composer percentages ("40% Tchaikovsky", "Minkus ... 30%")
//! - Preferred show time ("20h", "20hs", "20:30")
//! - Preferred weekday
//! - Age range ("18–34", "18-34")
//! - Channels and price sensitivity
//!
//! Nothing here fails: a malformed or out-of-range match leaves the field absent.
//! Digits may come from any Unicode decimal script ("٤٠%", "２０h") and are
//! read by their decimal value.

use crate::normalizer::fold;
use crate::signals::{AgeRange, AudienceSignals, ComposerPreferences, ShowTime};
use crate::vocabulary::{Channel, Composer, Weekday, DAY_SPELLINGS, PRICE_KEYWORDS};
use lazy_static::lazy_static;
use regex::Regex;

/// Compiled percentage patterns for one composer
struct ComposerPatterns {
    composer: Composer,
    /// `<N>% <name>`
    before: Regex,
    /// `<name> ... <N>%`
    after: Regex,
}

lazy_static! {
    static ref COMPOSER_PATTERNS: Vec<ComposerPatterns> = Composer::ALL
        .iter()
        .map(|&composer| {
            let name = regex::escape(composer.needle());
            ComposerPatterns {
                composer,
                before: Regex::new(&format!(r"(\d+)\s*%\s*{}", name)).unwrap(),
                after: Regex::new(&format!(r"{}.*?(\d+)\s*%", name)).unwrap(),
            }
        })
        .collect();

    /// Hour with `h`/`hs` suffix, or `HH:MM`
    static ref TIME: Regex = Regex::new(r"\b(\d{1,2})(?:(?:h|hs)|:(\d{2}))\b").unwrap();

    /// Age range with en-dash or hyphen
    static ref AGE_RANGE: Regex = Regex::new(r"\b(\d{1,2})\s*[–-]\s*(\d{1,2})\b").unwrap();

    /// One Unicode decimal digit
    static ref DIGIT: Regex = Regex::new(r"^\d$").unwrap();
}

/// Extract every signal from raw text
pub fn extract(text: &str) -> AudienceSignals {
    let folded = fold(text);

    AudienceSignals {
        composer_preferences: extract_composers(&folded),
        preferred_day: extract_day(&folded),
        preferred_time: extract_time(&folded),
        age_range: extract_age_range(&folded),
        channels: extract_channels(&folded),
        price_sensitive: is_price_sensitive(&folded),
    }
}

/// Composer percentages, clamped to [0, 100], in vocabulary order.
///
/// The percentage-before-name form wins when both forms match.
pub fn extract_composers(folded: &str) -> ComposerPreferences {
    let mut prefs = ComposerPreferences::new();

    for patterns in COMPOSER_PATTERNS.iter() {
        let captured = patterns
            .before
            .captures(folded)
            .or_else(|| patterns.after.captures(folded))
            .and_then(|caps| caps.get(1));

        if let Some(percent) = captured.and_then(|digits| clamp_percent(digits.as_str())) {
            prefs.insert(patterns.composer, percent);
        }
    }

    prefs
}

/// First time token, validated; minutes default to zero for the `h` form
pub fn extract_time(folded: &str) -> Option<ShowTime> {
    let caps = TIME.captures(folded)?;
    let hour = small_number(caps.get(1)?.as_str())?;
    let minute = match caps.get(2) {
        Some(m) => small_number(m.as_str())?,
        None => 0,
    };
    ShowTime::new(hour, minute)
}

/// First day spelling, in scan order, found anywhere in the text
pub fn extract_day(folded: &str) -> Option<Weekday> {
    DAY_SPELLINGS
        .iter()
        .find(|(spelling, _)| folded.contains(spelling))
        .map(|(_, day)| *day)
}

/// First age-range token, validated
pub fn extract_age_range(folded: &str) -> Option<AgeRange> {
    let caps = AGE_RANGE.captures(folded)?;
    let min = small_number(caps.get(1)?.as_str())?;
    let max = small_number(caps.get(2)?.as_str())?;
    AgeRange::new(min, max)
}

/// Channels mentioned in the text, in vocabulary order
pub fn extract_channels(folded: &str) -> Vec<Channel> {
    Channel::ALL
        .iter()
        .copied()
        .filter(|channel| folded.contains(channel.as_str()))
        .collect()
}

pub fn is_price_sensitive(folded: &str) -> bool {
    PRICE_KEYWORDS.iter().any(|keyword| folded.contains(keyword))
}

/// Percentage clamped to 100; digit strings too long for an integer are above 100 anyway
fn clamp_percent(digits: &str) -> Option<u8> {
    decimal_value(digits).map(|n| n.min(100) as u8)
}

/// Value of a short digit run, as captured by the `\d{1,2}` patterns
fn small_number(digits: &str) -> Option<u32> {
    decimal_value(digits).and_then(|n| u32::try_from(n).ok())
}

/// Decimal value of a run of digits from any script, saturating on overflow.
/// `None` when a character is not a decimal digit.
fn decimal_value(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u64, |acc, c| {
        digit_value(c).map(|d| acc.saturating_mul(10).saturating_add(u64::from(d)))
    })
}

/// Decimal digits are encoded as aligned runs of ten code points, zero first,
/// so a digit's value is its offset from the start of its run.
fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut offset = 0;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    Some(offset % 10)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT.is_match(c.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_before_name() {
        let prefs = extract_composers("40% tchaikovsky e 30 % minkus");
        assert_eq!(prefs.get(Composer::Tchaikovsky), Some(40));
        assert_eq!(prefs.get(Composer::Minkus), Some(30));
    }

    #[test]
    fn test_percent_after_name() {
        let prefs = extract_composers("prokofiev com cerca de 25%");
        assert_eq!(prefs.get(Composer::Prokofiev), Some(25));
    }

    #[test]
    fn test_before_form_preferred() {
        // "adam ... 10%" matches the after-form, "55% adam" the before-form
        let prefs = extract_composers("adam tem 10% menos que 55% adam");
        assert_eq!(prefs.get(Composer::Adam), Some(55));
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent("150"), Some(100));
        assert_eq!(clamp_percent("99999999999999999999999"), Some(100));
        assert_eq!(clamp_percent("007"), Some(7));
        assert_eq!(clamp_percent("4x"), None);
        assert_eq!(clamp_percent(""), None);
    }

    #[test]
    fn test_digit_value_across_scripts() {
        assert_eq!(digit_value('7'), Some(7));
        // Arabic-Indic
        assert_eq!(digit_value('\u{0664}'), Some(4));
        assert_eq!(digit_value('\u{0660}'), Some(0));
        // fullwidth
        assert_eq!(digit_value('\u{FF12}'), Some(2));
        // Devanagari
        assert_eq!(digit_value('\u{096F}'), Some(9));
        // mathematical bold digits sit in back-to-back runs of ten
        assert_eq!(digit_value('\u{1D7D0}'), Some(2));
        assert_eq!(digit_value('\u{1D7DA}'), Some(2));
        assert_eq!(digit_value('x'), None);
        assert_eq!(digit_value('²'), None);
    }

    #[test]
    fn test_time_forms() {
        assert_eq!(extract_time("às 20h").unwrap().to_string(), "20:00");
        assert_eq!(extract_time("às 9hs").unwrap().to_string(), "09:00");
        assert_eq!(extract_time("às 19:30").unwrap().to_string(), "19:30");
        assert_eq!(extract_time("às 25h"), None);
        assert_eq!(extract_time("às 20:75"), None);
        assert_eq!(extract_time("sem horário"), None);
    }

    #[test]
    fn test_day_scan_order() {
        assert_eq!(extract_day("prefere sabado"), Some(Weekday::Sabado));
        assert_eq!(extract_day("terca ou quarta"), Some(Weekday::Terca));
        // list order wins over text order
        assert_eq!(extract_day("domingo ou segunda"), Some(Weekday::Segunda));
    }

    #[test]
    fn test_channels_use_vocabulary_order() {
        assert_eq!(
            extract_channels("whatsapp, reels e instagram"),
            vec![Channel::Instagram, Channel::Reels, Channel::Whatsapp]
        );
    }
}
