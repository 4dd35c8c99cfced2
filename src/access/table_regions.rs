//! Table-region detection from positioned spans.
//!
//! Works without ruling lines: spans are grouped into rows by baseline,
//! and runs of adjacent rows whose cell positions line up into columns are
//! reported as table regions. The outline pipeline uses the resulting
//! bounding boxes to keep tabular text out of heading candidates.

use crate::model::{BBox, Span};

/// Thresholds for table-region detection.
#[derive(Debug, Clone)]
pub struct TableRegionConfig {
    /// Baseline tolerance when grouping spans into rows
    pub row_tolerance: f32,
    /// Horizontal tolerance when matching cell starts across rows
    pub col_tolerance: f32,
    /// Maximum vertical gap between consecutive rows of one table
    pub max_row_gap: f32,
    /// Minimum rows for a region to count as a table
    pub min_rows: usize,
    /// Minimum aligned columns for a row to count as tabular
    pub min_cols: usize,
}

impl Default for TableRegionConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 3.0,
            col_tolerance: 5.0,
            max_row_gap: 25.0,
            min_rows: 2,
            min_cols: 2,
        }
    }
}

/// A row of spans sharing a baseline, sorted left to right.
struct Row {
    y: f32,
    spans: Vec<Span>,
}

impl Row {
    fn cell_starts(&self) -> Vec<f32> {
        self.spans.iter().map(|s| s.bbox.x0).collect()
    }

    fn bbox(&self) -> BBox {
        let mut iter = self.spans.iter();
        // Rows are only built from at least one span
        let first = iter.next().map(|s| s.bbox).unwrap_or(BBox::new(0.0, 0.0, 0.0, 0.0));
        iter.fold(first, |acc, s| acc.union(&s.bbox))
    }
}

/// Detect table regions on a page from its positioned spans.
///
/// Returns one bounding box per region, in top-to-bottom order.
pub fn detect_table_regions(spans: &[Span], config: &TableRegionConfig) -> Vec<BBox> {
    let rows = group_into_rows(spans, config.row_tolerance);

    let mut regions = Vec::new();
    let mut run: Vec<&Row> = Vec::new();

    for row in &rows {
        if row.spans.len() < config.min_cols {
            flush_run(&mut run, &mut regions, config);
            continue;
        }

        match run.last() {
            Some(prev) => {
                let gap = (prev.y - row.y).abs();
                if gap <= config.max_row_gap
                    && aligned_columns(prev, row, config.col_tolerance) >= config.min_cols
                {
                    run.push(row);
                } else {
                    flush_run(&mut run, &mut regions, config);
                    run.push(row);
                }
            }
            None => run.push(row),
        }
    }

    flush_run(&mut run, &mut regions, config);
    regions
}

fn flush_run(run: &mut Vec<&Row>, regions: &mut Vec<BBox>, config: &TableRegionConfig) {
    if run.len() >= config.min_rows {
        let bbox = run
            .iter()
            .map(|r| r.bbox())
            .reduce(|acc, b| acc.union(&b));
        if let Some(bbox) = bbox {
            regions.push(bbox);
        }
    }
    run.clear();
}

/// Count cell starts of `b` that line up with a cell start of `a`.
fn aligned_columns(a: &Row, b: &Row, tolerance: f32) -> usize {
    let starts_a = a.cell_starts();
    b.cell_starts()
        .iter()
        .filter(|x| starts_a.iter().any(|ax| (*ax - **x).abs() <= tolerance))
        .count()
}

fn group_into_rows(spans: &[Span], tolerance: f32) -> Vec<Row> {
    let mut sorted: Vec<&Span> = spans.iter().collect();
    sorted.sort_by(|a, b| {
        let y_cmp = b
            .bbox
            .y0
            .partial_cmp(&a.bbox.y0)
            .unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.bbox
                .x0
                .partial_cmp(&b.bbox.x0)
                .unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut rows: Vec<Row> = Vec::new();
    for span in sorted {
        match rows.last_mut() {
            Some(row) if (row.y - span.bbox.y0).abs() <= tolerance => {
                row.spans.push(span.clone());
            }
            _ => rows.push(Row {
                y: span.bbox.y0,
                spans: vec![span.clone()],
            }),
        }
    }

    rows
}
