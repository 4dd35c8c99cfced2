//! Outline extraction pipeline.
//!
//! Derives a `{title, outline}` artifact from a document by relative
//! font-size analysis: the three largest distinct sizes anchor H1/H2/H3,
//! and every line is filtered, joined, and classified against those
//! anchors. See [`OutlineExtractor`] for the entry point.

mod classify;
mod extractor;
mod font_rank;
pub mod noise;
mod options;
mod title;

pub use classify::{FontSizeClassifier, HeadingClassifier};
pub use extractor::OutlineExtractor;
pub use font_rank::{analyze_font_sizes, FontSizeRank};
pub use options::OutlineOptions;
pub use title::extract_title;

/// Collapse runs of whitespace to single spaces and trim.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
