//! Heading level classification.

use crate::model::HeadingLevel;

use super::font_rank::FontSizeRank;

/// Strategy for mapping a candidate's average font size to a heading level.
pub trait HeadingClassifier {
    /// Classify a candidate, or `None` when it is body text.
    fn classify(&self, avg_size: f32, rank: &FontSizeRank) -> Option<HeadingLevel>;
}

/// Relative font-size classifier.
///
/// A candidate within 85% of the largest size is H1, within 85% of the
/// second-largest H2, within 75% of the third-largest H3. First match wins,
/// so an H1-sized candidate never falls through to a lower level.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontSizeClassifier;

impl FontSizeClassifier {
    const H1_RATIO: f32 = 0.85;
    const H2_RATIO: f32 = 0.85;
    const H3_RATIO: f32 = 0.75;
}

impl HeadingClassifier for FontSizeClassifier {
    fn classify(&self, avg_size: f32, rank: &FontSizeRank) -> Option<HeadingLevel> {
        if let Some(largest) = rank.largest {
            if avg_size >= largest * Self::H1_RATIO {
                return Some(HeadingLevel::H1);
            }
        }
        if let Some(second) = rank.second {
            if avg_size >= second * Self::H2_RATIO {
                return Some(HeadingLevel::H2);
            }
        }
        if let Some(third) = rank.third {
            if avg_size >= third * Self::H3_RATIO {
                return Some(HeadingLevel::H3);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank() -> FontSizeRank {
        FontSizeRank::from_sizes(vec![24.0, 18.0, 14.0, 11.0])
    }

    #[test]
    fn test_h1_at_threshold() {
        let c = FontSizeClassifier;
        // 24 * 0.85 = 20.4
        assert_eq!(c.classify(20.4, &rank()), Some(HeadingLevel::H1));
        assert_eq!(c.classify(24.0, &rank()), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_h2_band() {
        let c = FontSizeClassifier;
        // 18 * 0.85 = 15.3, below the 20.4 H1 cutoff
        assert_eq!(c.classify(18.0, &rank()), Some(HeadingLevel::H2));
        assert_eq!(c.classify(15.3, &rank()), Some(HeadingLevel::H2));
    }

    #[test]
    fn test_h3_band_and_body_text() {
        let c = FontSizeClassifier;
        // 14 * 0.75 = 10.5
        assert_eq!(c.classify(11.0, &rank()), Some(HeadingLevel::H3));
        assert_eq!(c.classify(10.5, &rank()), Some(HeadingLevel::H3));
        assert_eq!(c.classify(10.4, &rank()), None);
    }

    #[test]
    fn test_empty_rank_classifies_nothing() {
        let c = FontSizeClassifier;
        assert_eq!(c.classify(96.0, &FontSizeRank::default()), None);
    }

    #[test]
    fn test_missing_lower_anchors() {
        let c = FontSizeClassifier;
        let rank = FontSizeRank::from_sizes(vec![20.0]);
        assert_eq!(c.classify(20.0, &rank), Some(HeadingLevel::H1));
        // No second/third anchor, so anything below the H1 band is body text
        assert_eq!(c.classify(12.0, &rank), None);
    }
}
