//! Scan lines sweeping across the glyph grid.

use crate::geometry::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLine {
    pub position: usize,
    pub axis: Axis,
}

impl ScanLine {
    pub const fn new(axis: Axis) -> Self {
        Self { position: 0, axis }
    }

    /// Length of the axis this line moves along.
    pub fn extent(&self, rows: usize, cols: usize) -> usize {
        match self.axis {
            Axis::Vertical => cols,
            Axis::Horizontal => rows,
        }
    }
}

/// One vertical and one horizontal line, both at the origin.
pub fn default_scan_lines() -> Vec<ScanLine> {
    vec![ScanLine::new(Axis::Vertical), ScanLine::new(Axis::Horizontal)]
}

/// Moves every line one cell forward, wrapping at the grid edge.
pub fn tick(lines: &[ScanLine], rows: usize, cols: usize) -> Vec<ScanLine> {
    lines
        .iter()
        .map(|line| {
            let extent = line.extent(rows, cols);
            let position = if extent == 0 {
                0
            } else {
                (line.position + 1) % extent
            };
            ScanLine { position, ..*line }
        })
        .collect()
}
