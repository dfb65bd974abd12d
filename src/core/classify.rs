//! Decide whether a decoded literal is user-visible text.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::contains_alphabetic;

/// Standard .NET numeric format: one format letter with optional precision (`N2`, `F0`).
static STANDARD_NUMERIC_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[NDEFGRPXndefgrpx]\d*$").unwrap());

/// Custom .NET numeric format built from placeholders only (`#,##0.00`, `0%`).
static CUSTOM_NUMERIC_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[#0.,%Ee+\-]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Translatable,
    PassThrough,
}

impl Classification {
    pub fn is_translatable(self) -> bool {
        self == Classification::Translatable
    }
}

/// Classify a decoded literal.
///
/// Raw (`@`/`$`) strings are left alone: they hold paths, regexes and
/// interpolation templates far more often than UI text.
pub fn classify(text: &str, raw: bool) -> Classification {
    if text.is_empty() || raw || !contains_alphabetic(text) || is_numeric_format(text) {
        Classification::PassThrough
    } else {
        Classification::Translatable
    }
}

/// True for strings a runtime number formatter interprets.
pub fn is_numeric_format(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    STANDARD_NUMERIC_FORMAT.is_match(text) || CUSTOM_NUMERIC_FORMAT.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translatable_text() {
        assert_eq!(classify("Hello World", false), Classification::Translatable);
        assert_eq!(classify("Mun", false), Classification::Translatable);
        assert_eq!(classify("Émission", false), Classification::Translatable);
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(classify("", false), Classification::PassThrough);
        assert_eq!(classify("3.14", false), Classification::PassThrough);
        assert_eq!(classify(" - ", false), Classification::PassThrough);
        assert_eq!(classify("{0}", false), Classification::PassThrough);
    }

    #[test]
    fn test_raw_strings_pass_through() {
        assert_eq!(classify("Hello World", true), Classification::PassThrough);
    }

    #[test]
    fn test_numeric_formats() {
        assert_eq!(classify("N2", false), Classification::PassThrough);
        assert_eq!(classify("F0", false), Classification::PassThrough);
        assert_eq!(classify("x", false), Classification::PassThrough);
        assert_eq!(classify("#,##0.00", false), Classification::PassThrough);
        assert_eq!(classify("0.0E+0", false), Classification::PassThrough);
    }

    #[test]
    fn test_is_numeric_format() {
        assert!(is_numeric_format("P1"));
        assert!(is_numeric_format("0%"));
        assert!(!is_numeric_format("N2 units"));
        assert!(!is_numeric_format("Next"));
        assert!(!is_numeric_format(""));
        assert!(!is_numeric_format("   "));
    }
}
