//! Outline assembly.
//!
//! Walks a document page by page, filters out table regions and noise, and
//! classifies the surviving lines into heading entries. Entries come out in
//! page-then-visual order, never deduplicated or reordered, so the outline
//! mirrors the document as read.

use crate::access::PdfAccess;
use crate::error::Result;
use crate::model::{HeadingEntry, Outline, TextLine};

use super::classify::{FontSizeClassifier, HeadingClassifier};
use super::font_rank::analyze_font_sizes;
use super::noise::is_noise;
use super::options::OutlineOptions;
use super::title::extract_title;
use super::normalize_whitespace;

/// Extracts a title and heading outline from a document.
///
/// One extractor serves one `extract` call cleanly; it holds no per-document
/// state, so reuse across documents is also fine.
pub struct OutlineExtractor {
    options: OutlineOptions,
    classifier: Box<dyn HeadingClassifier>,
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineExtractor {
    /// Create an extractor with default options and the font-size classifier.
    pub fn new() -> Self {
        Self::with_options(OutlineOptions::default())
    }

    /// Create an extractor with the given options.
    pub fn with_options(options: OutlineOptions) -> Self {
        Self {
            options,
            classifier: Box::new(FontSizeClassifier),
        }
    }

    /// Swap in a different classification strategy.
    pub fn with_classifier(mut self, classifier: Box<dyn HeadingClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Extract the outline of a document.
    pub fn extract(&self, access: &dyn PdfAccess) -> Result<Outline> {
        let min_len = self.options.min_heading_len;

        let rank = analyze_font_sizes(access, min_len)?;
        let title = extract_title(access, min_len)?;
        let mut outline = Outline::with_title(title);

        for page in 1..=access.page_count() {
            let tables = if self.options.exclude_tables {
                access.page_tables(page)?
            } else {
                Vec::new()
            };

            for block in access.page_blocks(page)? {
                // Only fully-contained blocks are tabular; a block straddling
                // a table edge stays eligible.
                if tables.iter().any(|t| t.contains(&block.bbox)) {
                    continue;
                }

                for line in &block.lines {
                    if let Some((text, avg_size)) = heading_candidate(line, min_len) {
                        if let Some(level) = self.classifier.classify(avg_size, &rank) {
                            outline.outline.push(HeadingEntry {
                                level,
                                text,
                                page: page - 1,
                            });
                        }
                    }
                }
            }
        }

        log::debug!(
            "outline: {} headings, title {:?}",
            outline.len(),
            outline.title
        );
        Ok(outline)
    }
}

/// Reduce a line to a heading candidate: the joined text of its qualifying
/// spans plus their average font size.
///
/// Spans that are too short or pure noise are dropped first; the joined text
/// must then pass the same two checks itself.
fn heading_candidate(line: &TextLine, min_len: usize) -> Option<(String, f32)> {
    let survivors: Vec<&crate::model::Span> = line
        .spans
        .iter()
        .filter(|s| {
            let t = s.text.trim();
            t.chars().count() >= min_len && !is_noise(t)
        })
        .collect();

    if survivors.is_empty() {
        return None;
    }

    let joined = survivors
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let text = normalize_whitespace(&joined);

    if text.chars().count() < min_len || is_noise(&text) {
        return None;
    }

    let avg_size = survivors.iter().map(|s| s.size).sum::<f32>() / survivors.len() as f32;
    Some((text, avg_size))
}
