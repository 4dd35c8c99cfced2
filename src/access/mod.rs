//! PDF access abstraction layer.
//!
//! Provides a trait-based interface over page content, isolating the
//! concrete PDF library (lopdf) from the outline and ranking pipelines.
//! Implementations must preserve the visual/document order of blocks and
//! spans as the source format defines it.

mod lopdf_access;
mod table_regions;

pub use lopdf_access::LopdfAccess;
pub use table_regions::{detect_table_regions, TableRegionConfig};

use crate::error::Result;
use crate::model::{BBox, TextBlock};

/// Abstract interface for PDF document access.
///
/// One value corresponds to one open document; pages are 1-based.
pub trait PdfAccess {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text blocks of a page, each holding lines of spans, in the order the
    /// content stream yields them.
    fn page_blocks(&self, page: u32) -> Result<Vec<TextBlock>>;

    /// Bounding boxes of detected table regions on a page.
    fn page_tables(&self, page: u32) -> Result<Vec<BBox>>;

    /// Raw text of a page, as a plain extraction without layout analysis.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Simple text decoding fallback when no font encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    // Try UTF-8
    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
