//! Title extraction from the first page.

use crate::access::PdfAccess;
use crate::error::Result;

use super::normalize_whitespace;

/// Extract a document title from the first page.
///
/// The largest font size wins: a strictly larger span resets the candidate
/// list, an equal-sized span appends. Candidates are joined with single
/// spaces. When no span qualifies, falls back to the first non-empty line
/// of the page's raw text. Returns an empty string when nothing survives.
pub fn extract_title(access: &dyn PdfAccess, min_len: usize) -> Result<String> {
    if access.page_count() == 0 {
        return Ok(String::new());
    }

    let mut max_size = 0.0_f32;
    let mut candidates: Vec<String> = Vec::new();

    for block in access.page_blocks(1)? {
        for line in &block.lines {
            for span in &line.spans {
                let text = span.text.trim();
                if text.chars().count() < min_len {
                    continue;
                }
                if span.size > max_size {
                    max_size = span.size;
                    candidates = vec![text.to_string()];
                } else if span.size == max_size {
                    candidates.push(text.to_string());
                }
            }
        }
    }

    let title = normalize_whitespace(&candidates.join(" "));
    if !title.is_empty() {
        return Ok(title);
    }

    // Fallback: first non-empty raw text line
    let raw = access.page_text(1)?;
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.chars().count() >= min_len {
            return Ok(normalize_whitespace(line));
        }
        break;
    }

    Ok(String::new())
}
