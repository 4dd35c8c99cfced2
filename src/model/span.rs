//! Span-level geometry types produced by the PDF access layer.

/// An axis-aligned bounding box in page coordinates.
///
/// PDF page space puts the origin at the bottom-left, so `y0 <= y1` means
/// `y0` is the lower edge. Containment only cares about edge ordering being
/// consistent between the two boxes, which the access layer guarantees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Check whether `other` lies fully inside this box on all four edges.
    ///
    /// A box straddling the boundary is not contained.
    pub fn contains(&self, other: &BBox) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// An atomic unit of text as laid out on a page.
///
/// Produced by the PDF access layer and consumed read-only by the outline
/// pipeline.
#[derive(Debug, Clone)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Page-relative bounding box
    pub bbox: BBox,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            size,
            bbox,
        }
    }
}

/// An ordered sequence of spans sharing a visual text line.
#[derive(Debug, Clone, Default)]
pub struct TextLine {
    /// Spans in visual (left-to-right) order
    pub spans: Vec<Span>,
}

impl TextLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Bounding box covering every span, or `None` for an empty line.
    pub fn bbox(&self) -> Option<BBox> {
        let mut iter = self.spans.iter();
        let first = iter.next()?.bbox;
        Some(iter.fold(first, |acc, s| acc.union(&s.bbox)))
    }
}

/// A visual text block: one or more lines sharing a region on the page.
///
/// Blocks are yielded in the document order the PDF content stream defines;
/// the outline pipeline reproduces that order faithfully.
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// Block bounding box
    pub bbox: BBox,
    /// Lines in reading order
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a block, computing the bbox from its lines.
    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        let bbox = lines
            .iter()
            .filter_map(|l| l.bbox())
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or(BBox::new(0.0, 0.0, 0.0, 0.0));
        Self { bbox, lines }
    }

    /// Check if the block has no spans at all.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.is_empty())
    }
}
