//! Noise filtering for heading candidates.
//!
//! Page furniture like bare page numbers, roman numerals, list markers, and
//! separator runs must never become headings, whatever their font size.
//! Each rule is a named full-match pattern so it can be tested on its own.

use once_cell::sync::Lazy;
use regex::Regex;

/// A single named noise pattern.
pub struct NoiseRule {
    /// Stable rule name, for diagnostics
    pub name: &'static str,
    pattern: Regex,
}

impl NoiseRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        // Patterns are compile-time constants; a failure here is a bug.
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// Whether the whole of `text` matches this rule.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// The noise rules, in evaluation order.
pub static NOISE_RULES: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    vec![
        NoiseRule::new("page-number", r"^\d+$"),
        NoiseRule::new("roman-numeral", r"^[ivx]+$"),
        NoiseRule::new("single-letter", r"^[A-Za-z]\s*$"),
        NoiseRule::new("lettered-item", r"^[A-Z]\.\s*$"),
        NoiseRule::new("dash-run", r"^-+$"),
        NoiseRule::new("dot-run", r"^\.+$"),
        NoiseRule::new("symbols-only", r"^[\W_]+$"),
    ]
});

/// Whether `text` matches any noise rule.
pub fn is_noise(text: &str) -> bool {
    NOISE_RULES.iter().any(|r| r.matches(text))
}

/// Name of the first matching rule, if any.
pub fn matching_rule(text: &str) -> Option<&'static str> {
    NOISE_RULES.iter().find(|r| r.matches(text)).map(|r| r.name)
}
