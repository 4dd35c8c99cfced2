//! Outline output types.

use serde::{Deserialize, Serialize};

/// Heading level assigned by relative font-size comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadingLevel::H1 => write!(f, "H1"),
            HeadingLevel::H2 => write!(f, "H2"),
            HeadingLevel::H3 => write!(f, "H3"),
        }
    }
}

/// One classified heading in a document outline.
///
/// `page` is 0-based. Entries are appended in page-then-visual order and are
/// never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Whitespace-normalized heading text
    pub text: String,
    /// 0-based page index
    pub page: u32,
}

/// The outline artifact produced for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (may be empty if no candidate survived)
    pub title: String,
    /// Ordered heading entries
    pub outline: Vec<HeadingEntry>,
}

impl Outline {
    /// Create an empty outline with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Number of heading entries.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline has no entries.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_serializes_as_tag() {
        let entry = HeadingEntry {
            level: HeadingLevel::H2,
            text: "Background".to_string(),
            page: 3,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"level\":\"H2\""));
        assert!(json.contains("\"page\":3"));
    }

    #[test]
    fn test_outline_json_shape() {
        let outline = Outline {
            title: "Report".to_string(),
            outline: vec![HeadingEntry {
                level: HeadingLevel::H1,
                text: "Chapter One".to_string(),
                page: 0,
            }],
        };
        let json = serde_json::to_string(&outline).unwrap();
        assert!(json.starts_with("{\"title\":"));
        assert!(json.contains("\"outline\":["));
    }

    #[test]
    fn test_outline_round_trip() {
        let outline = Outline::with_title("T");
        let json = serde_json::to_string(&outline).unwrap();
        let back: Outline = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, "T");
        assert!(back.is_empty());
    }
}
