//! Data model for pdfsift.
//!
//! Geometry and span types produced by the PDF access layer, the outline
//! output shape, and the relevance-ranking input/output shapes.

mod outline;
mod report;
mod span;

pub use outline::{HeadingEntry, HeadingLevel, Outline};
pub use report::{
    DocumentRef, ExtractedSection, Job, PageBlockText, Persona, RankInput, RelevanceReport,
    ReportMetadata, ScoredBlock, SubsectionAnalysis,
};
pub use span::{BBox, Span, TextBlock, TextLine};
