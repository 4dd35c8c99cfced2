//! # pdfsift
//!
//! Structure extraction and persona-driven section ranking for PDF
//! documents.
//!
//! Two pipelines share one PDF access layer:
//!
//! - **Outline extraction** derives a `{title, outline}` artifact from a
//!   document using relative font-size analysis, with table-region and
//!   noise filtering.
//! - **Relevance ranking** pools page texts across a document set, embeds
//!   them with a persona/task query, and reports the top sections by
//!   cosine similarity.
//!
//! ## Quick start
//!
//! ```no_run
//! use pdfsift::extract_outline;
//!
//! let outline = extract_outline("report.pdf")?;
//! println!("{}", outline.title);
//! for entry in &outline.outline {
//!     println!("{} {} (page {})", entry.level, entry.text, entry.page);
//! }
//! # Ok::<(), pdfsift::Error>(())
//! ```
//!
//! Custom options:
//!
//! ```no_run
//! use pdfsift::{extract_outline_with_options, OutlineOptions};
//!
//! let options = OutlineOptions::new().with_min_heading_len(4);
//! let outline = extract_outline_with_options("report.pdf", options)?;
//! # Ok::<(), pdfsift::Error>(())
//! ```

pub mod access;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod rank;

use std::path::Path;

pub use access::{LopdfAccess, PdfAccess, TableRegionConfig};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    HeadingEntry, HeadingLevel, Outline, PageBlockText, RankInput, RelevanceReport, ScoredBlock,
};
pub use outline::{FontSizeClassifier, HeadingClassifier, OutlineExtractor, OutlineOptions};
pub use rank::{Embedder, HashEmbedder};

/// Extract the outline of a PDF file with default options.
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    extract_outline_with_options(path, OutlineOptions::default())
}

/// Extract the outline of a PDF file with custom options.
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: OutlineOptions,
) -> Result<Outline> {
    let access = LopdfAccess::open(path)?;
    OutlineExtractor::with_options(options).extract(&access)
}

/// Run the full relevance-ranking pipeline over a document set.
///
/// Opens each listed document under `base_dir` in order, pools one
/// candidate block per non-empty page, ranks the pool against the
/// persona/task query with the given embedder, and assembles the report.
pub fn process_documents<P: AsRef<Path>>(
    input: &RankInput,
    base_dir: P,
    embedder: &dyn Embedder,
) -> Result<RelevanceReport> {
    let base_dir = base_dir.as_ref();

    let mut pool = Vec::new();
    for doc in &input.documents {
        let access = LopdfAccess::open(base_dir.join(&doc.filename))?;
        pool.extend(rank::collect_page_blocks(&access, &doc.filename)?);
    }

    let ranked = rank::rank_blocks(embedder, &input.query(), pool, rank::TOP_K)?;
    Ok(rank::build_report(input, &ranked))
}
