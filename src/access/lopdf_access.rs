//! Concrete [`PdfAccess`] backed by `lopdf::Document`.
//!
//! Span positions and font sizes come from walking each page's content
//! stream (Tf/Td/TD/Tm/T*/Tj/TJ and the quote operators) with a text
//! matrix. Lines are grouped by baseline proximity and blocks by vertical
//! spacing, so downstream consumers see the same page-block-line-span
//! shape the source layout defines.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::{BBox, Span, TextBlock, TextLine};

use super::table_regions::{detect_table_regions, TableRegionConfig};
use super::{decode_text_simple, PdfAccess};

/// A positioned span before conversion to the public model.
#[derive(Debug, Clone)]
struct PosSpan {
    text: String,
    x: f32,
    y: f32,
    width: f32,
    size: f32,
}

impl PosSpan {
    fn to_span(&self) -> Span {
        // Approximate ascender/descender from the font size.
        let bbox = BBox::new(
            self.x,
            self.y - self.size * 0.2,
            self.x + self.width,
            self.y + self.size * 0.8,
        );
        Span::new(self.text.clone(), self.size, bbox)
    }
}

/// PDF access implementation on top of lopdf.
pub struct LopdfAccess {
    doc: LopdfDocument,
    table_config: TableRegionConfig,
}

impl LopdfAccess {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self {
            doc,
            table_config: TableRegionConfig::default(),
        })
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self {
            doc,
            table_config: TableRegionConfig::default(),
        })
    }

    /// Override the table-region detection thresholds.
    pub fn with_table_config(mut self, config: TableRegionConfig) -> Self {
        self.table_config = config;
        self
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, pages.len() as u32))
    }

    /// Raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // A page without a Contents entry is legal; it simply has no text
        let contents = match page_dict.get(b"Contents") {
            Ok(c) => c,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Stream(s) => s
                .decompressed_content()
                .map_err(|e| Error::PdfParse(e.to_string())),
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Extract positioned spans from a page by interpreting its content
    /// stream.
    fn page_spans(&self, page: u32) -> Result<Vec<PosSpan>> {
        let page_id = self.page_id(page)?;

        let lopdf_fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let content_bytes = self.page_content(page_id)?;
        let content = lopdf::content::Content::decode(&content_bytes)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if in_text_block {
                        let text = self.decode_show_text(&op, &current_font_name, &lopdf_fonts);
                        self.push_span(&mut spans, text, &matrix, current_font_size);
                    }
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text =
                                self.decode_with_font(&current_font_name, bytes, &lopdf_fonts);
                            self.push_span(&mut spans, text, &matrix, current_font_size);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode the operand of a Tj or TJ operator.
    fn decode_show_text(
        &self,
        op: &lopdf::content::Operation,
        font_name: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        if op.operator == "TJ" {
            // TJ: array of strings and kerning adjustments in 1/1000 text
            // space units. Large negative adjustments act as word spaces.
            let mut combined = String::new();
            let space_threshold = 200.0;

            if let Some(Object::Array(arr)) = op.operands.first() {
                for item in arr {
                    match item {
                        Object::String(bytes, _) => {
                            combined.push_str(&self.decode_with_font(font_name, bytes, fonts));
                        }
                        Object::Integer(n) => {
                            if -(*n as f32) > space_threshold
                                && !combined.is_empty()
                                && !combined.ends_with(' ')
                            {
                                combined.push(' ');
                            }
                        }
                        Object::Real(n) => {
                            if -n > space_threshold
                                && !combined.is_empty()
                                && !combined.ends_with(' ')
                            {
                                combined.push(' ');
                            }
                        }
                        _ => {}
                    }
                }
            }
            combined
        } else if let Some(Object::String(bytes, _)) = op.operands.first() {
            self.decode_with_font(font_name, bytes, fonts)
        } else {
            String::new()
        }
    }

    /// Decode text bytes using the current font's encoding, with a simple
    /// fallback when the font or its encoding is unavailable.
    fn decode_with_font(
        &self,
        font_name: &[u8],
        bytes: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        if let Some(font_dict) = fonts.get(font_name) {
            if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn push_span(&self, spans: &mut Vec<PosSpan>, text: String, matrix: &TextMatrix, size: f32) {
        if text.trim().is_empty() {
            return;
        }
        let (x, y) = matrix.position();
        let effective_size = size * matrix.scale();
        // Rough advance estimate; good enough for line/region grouping.
        let width = text.chars().count() as f32 * effective_size * 0.5;
        spans.push(PosSpan {
            text,
            x,
            y,
            width,
            size: effective_size,
        });
    }
}

impl PdfAccess for LopdfAccess {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page_blocks(&self, page: u32) -> Result<Vec<TextBlock>> {
        let spans = self.page_spans(page)?;
        let lines = group_spans_into_lines(spans);
        let blocks = group_lines_into_blocks(lines);
        log::debug!("page {}: {} blocks", page, blocks.len());
        Ok(blocks)
    }

    fn page_tables(&self, page: u32) -> Result<Vec<BBox>> {
        let spans: Vec<Span> = self.page_spans(page)?.iter().map(PosSpan::to_span).collect();
        let regions = detect_table_regions(&spans, &self.table_config);
        log::debug!("page {}: {} table regions", page, regions.len());
        Ok(regions)
    }

    fn page_text(&self, page: u32) -> Result<String> {
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))
    }
}

/// Group spans into lines by baseline proximity.
///
/// Spans are sorted top-to-bottom (PDF Y is bottom-up) then left-to-right;
/// a span joins the current line when its baseline is within 30% of its
/// font size.
fn group_spans_into_lines(mut spans: Vec<PosSpan>) -> Vec<Vec<PosSpan>> {
    if spans.is_empty() {
        return vec![];
    }

    spans.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<Vec<PosSpan>> = Vec::new();
    let mut current: Vec<PosSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let y_tolerance = span.size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= y_tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Group lines into blocks by vertical spacing, font-size shifts, and
/// indentation changes.
fn group_lines_into_blocks(lines: Vec<Vec<PosSpan>>) -> Vec<TextBlock> {
    if lines.is_empty() {
        return vec![];
    }

    let avg_spacing = average_line_spacing(&lines);

    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();
    let mut prev: Option<(f32, f32, f32)> = None; // (y, x, size)

    for line in lines {
        let y = line[0].y;
        let x = line[0].x;
        let size = dominant_size(&line);

        if let Some((py, px, psize)) = prev {
            let spacing = (py - y).abs();
            let should_break = spacing > avg_spacing * 1.5
                || (psize - size).abs() > 1.0
                || (px - x).abs() > 20.0;
            if should_break && !current.is_empty() {
                blocks.push(TextBlock::from_lines(std::mem::take(&mut current)));
            }
        }

        current.push(TextLine::new(line.iter().map(PosSpan::to_span).collect()));
        prev = Some((y, x, size));
    }

    if !current.is_empty() {
        blocks.push(TextBlock::from_lines(current));
    }

    blocks
}

fn average_line_spacing(lines: &[Vec<PosSpan>]) -> f32 {
    if lines.len() < 2 {
        return 12.0;
    }

    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0][0].y - w[1][0].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Dominant font size of a line, weighted by text length.
fn dominant_size(line: &[PosSpan]) -> f32 {
    let total_chars: usize = line.iter().map(|s| s.text.len()).sum();
    if total_chars == 0 {
        return line.first().map(|s| s.size).unwrap_or(12.0);
    }
    let weighted: f32 = line.iter().map(|s| s.size * s.text.len() as f32).sum();
    weighted / total_chars as f32
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default line leading; TL is rare enough in practice to ignore here.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(text: &str, x: f32, y: f32, size: f32) -> PosSpan {
        PosSpan {
            text: text.to_string(),
            x,
            y,
            width: text.chars().count() as f32 * size * 0.5,
            size,
        }
    }

    #[test]
    fn test_group_spans_same_baseline() {
        let spans = vec![pos("world", 60.0, 700.0, 12.0), pos("Hello", 10.0, 700.5, 12.0)];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 1);
        // Sorted left to right within the line
        assert_eq!(lines[0][0].text, "Hello");
        assert_eq!(lines[0][1].text, "world");
    }

    #[test]
    fn test_group_spans_separate_lines() {
        let spans = vec![pos("first", 10.0, 700.0, 12.0), pos("second", 10.0, 680.0, 12.0)];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].text, "first");
        assert_eq!(lines[1][0].text, "second");
    }

    #[test]
    fn test_blocks_split_on_large_gap() {
        // Three tightly-spaced lines, then a far-away one
        let lines = vec![
            vec![pos("a", 10.0, 700.0, 12.0)],
            vec![pos("b", 10.0, 686.0, 12.0)],
            vec![pos("c", 10.0, 672.0, 12.0)],
            vec![pos("d", 10.0, 600.0, 12.0)],
        ];
        let blocks = group_lines_into_blocks(lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines.len(), 3);
        assert_eq!(blocks[1].lines.len(), 1);
    }

    #[test]
    fn test_blocks_split_on_font_size_change() {
        let lines = vec![
            vec![pos("Heading", 10.0, 700.0, 18.0)],
            vec![pos("body", 10.0, 686.0, 11.0)],
        ];
        let blocks = group_lines_into_blocks(lines);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_text_matrix_translate() {
        let mut m = TextMatrix::default();
        m.translate(10.0, -14.0);
        assert_eq!(m.position(), (10.0, -14.0));
        m.translate(0.0, -14.0);
        assert_eq!(m.position(), (10.0, -28.0));
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut m = TextMatrix::default();
        m.set(2.0, 0.0, 0.0, 2.0, 100.0, 200.0);
        assert_eq!(m.scale(), 2.0);
        assert_eq!(m.position(), (100.0, 200.0));
    }

    #[test]
    fn test_dominant_size_weighted() {
        let line = vec![pos("long body text", 0.0, 0.0, 10.0), pos("x", 80.0, 0.0, 20.0)];
        let size = dominant_size(&line);
        assert!(size < 12.0, "short large span should not dominate: {}", size);
    }
}
