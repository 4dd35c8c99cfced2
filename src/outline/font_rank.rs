//! Document-wide font size statistics.
//!
//! Heading levels are relative: the three largest distinct font sizes used
//! by meaningful text anchor H1/H2/H3. A document with fewer distinct sizes
//! simply has fewer anchors.

use crate::access::PdfAccess;
use crate::error::Result;

/// The three largest distinct font sizes in a document, descending.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontSizeRank {
    /// Largest size seen, if any text qualified
    pub largest: Option<f32>,
    /// Second-largest distinct size
    pub second: Option<f32>,
    /// Third-largest distinct size
    pub third: Option<f32>,
}

impl FontSizeRank {
    /// Build a rank from raw span sizes (any order, duplicates fine).
    pub fn from_sizes(mut sizes: Vec<f32>) -> Self {
        sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        sizes.dedup();
        Self {
            largest: sizes.first().copied(),
            second: sizes.get(1).copied(),
            third: sizes.get(2).copied(),
        }
    }

    /// Whether any size qualified.
    pub fn is_empty(&self) -> bool {
        self.largest.is_none()
    }
}

/// Collect span sizes over every page of a document and rank them.
///
/// Only spans whose trimmed text has at least `min_len` characters count;
/// decorative fragments would otherwise skew the hierarchy.
pub fn analyze_font_sizes(access: &dyn PdfAccess, min_len: usize) -> Result<FontSizeRank> {
    let mut sizes = Vec::new();

    for page in 1..=access.page_count() {
        for block in access.page_blocks(page)? {
            for line in &block.lines {
                for span in &line.spans {
                    if span.text.trim().chars().count() >= min_len {
                        sizes.push(span.size);
                    }
                }
            }
        }
    }

    Ok(FontSizeRank::from_sizes(sizes))
}
