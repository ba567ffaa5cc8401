//! Text normalization for DOSSIE-IN.
//!
//! The extractor matches against a case-folded copy of the input; the
//! original text is never modified.

/// Case-fold text for pattern matching
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Check if text carries no content at all
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_keeps_accents() {
        assert_eq!(fold("SÁBADO às 20H"), "sábado às 20h");
    }

    #[test]
    fn test_blank_detection() {
        assert!(is_blank("  \n\t "));
        assert!(!is_blank(" x "));
    }
}
