//! # Occupancy Grid Packing
//!
//! Places elements on a fixed `rows × cols` partition of the canvas. Each
//! element's pixel size is rounded up to a whole number of cells and the
//! grid is scanned row-major for the first fully free block.
//!
//! When no free block exists the packer degrades instead of failing:
//! 1. Grid: first free `row_span × col_span` block, row-major
//! 2. Stride: first stride-aligned block whose columns fit, overlap allowed
//! 3. Random: anywhere on the canvas, overlap allowed
//!
//! Rungs 1 and 2 are deterministic. Rung 3 draws from the caller's RNG and
//! is only reachable when an element is wider than the whole grid.

use rand::Rng;

use crate::model::{Canvas, Rect};
use crate::options::{LayoutOptions, Size};

/// Tolerance for span rounding so 200px / 66.666px stays 3 cells, not 4.
const SPAN_EPSILON: f64 = 1e-9;

/// Which rung of the fallback ladder produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// A free block was found; the element overlaps nothing.
    Grid,
    /// Grid exhausted; placed on a stride-aligned block, may overlap.
    Stride,
    /// No stride position fits; placed at a random point, may overlap.
    Random,
}

/// Result of placing one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    pub strategy: PlacementStrategy,
}

/// The occupancy grid for one layout computation.
#[derive(Debug, Clone)]
pub struct GridPacker {
    rows: usize,
    cols: usize,
    cell_width: f64,
    cell_height: f64,
    margin_x: f64,
    margin_y: f64,
    canvas: Canvas,
    /// Occupancy grid: true = occupied
    occupied: Vec<Vec<bool>>,
}

impl GridPacker {
    pub fn new(canvas: Canvas, options: &LayoutOptions) -> Self {
        let rows = options.grid_rows.max(1);
        let cols = options.grid_cols.max(1);
        let cell_width = canvas.width / cols as f64;
        let cell_height = canvas.height / rows as f64;
        Self {
            rows,
            cols,
            cell_width,
            cell_height,
            margin_x: options.min_spacing * cell_width / 2.0,
            margin_y: options.min_spacing * cell_height / 2.0,
            canvas,
            occupied: vec![vec![false; cols]; rows],
        }
    }

    /// Cells needed to hold a pixel size, rounded up, at least one each way.
    /// Returns `(row_span, col_span)`. Spans are capped one past the grid
    /// size; anything larger cannot fit either way.
    pub fn span(&self, size: Size) -> (usize, usize) {
        let row_span = cells(size.height, self.cell_height, self.rows + 1);
        let col_span = cells(size.width, self.cell_width, self.cols + 1);
        (row_span, col_span)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupied
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.occupied.iter().flatten().filter(|&&cell| cell).count()
    }

    /// Whether the whole block is in bounds and free.
    fn fits(&self, row: usize, col: usize, row_span: usize, col_span: usize) -> bool {
        if row.saturating_add(row_span) > self.rows || col.saturating_add(col_span) > self.cols {
            return false;
        }
        self.occupied
            .iter()
            .skip(row)
            .take(row_span)
            .all(|r| r.iter().skip(col).take(col_span).all(|&cell| !cell))
    }

    /// Mark a block occupied, clipped to the grid.
    fn mark(&mut self, row: usize, col: usize, row_span: usize, col_span: usize) {
        let row_end = row.saturating_add(row_span).min(self.rows);
        let col_end = col.saturating_add(col_span).min(self.cols);
        for r in row..row_end {
            for c in col..col_end {
                self.occupied[r][c] = true;
            }
        }
    }

    /// Mark every cell a pixel rectangle touches. Used to keep packed
    /// elements clear of rectangles placed by other means.
    pub fn reserve(&mut self, rect: &Rect) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let col_start = (rect.x / self.cell_width).floor().max(0.0) as usize;
        let row_start = (rect.y / self.cell_height).floor().max(0.0) as usize;
        let col_end = ((rect.right() / self.cell_width) - SPAN_EPSILON).ceil().max(0.0) as usize;
        let row_end = ((rect.bottom() / self.cell_height) - SPAN_EPSILON).ceil().max(0.0) as usize;
        if col_start >= self.cols || row_start >= self.rows {
            return;
        }
        self.mark(
            row_start,
            col_start,
            row_end.saturating_sub(row_start),
            col_end.saturating_sub(col_start),
        );
    }

    fn cell_rect(&self, row: usize, col: usize, size: Size) -> Rect {
        Rect::new(
            col as f64 * self.cell_width + self.margin_x,
            row as f64 * self.cell_height + self.margin_y,
            size.width,
            size.height,
        )
    }

    /// Place one element of the given pixel size, walking the fallback
    /// ladder as far as needed.
    pub fn place<R: Rng + ?Sized>(&mut self, size: Size, rng: &mut R) -> Placement {
        let (row_span, col_span) = self.span(size);

        if let Some((row, col)) = self.find_free(row_span, col_span) {
            self.mark(row, col, row_span, col_span);
            return Placement {
                rect: self.cell_rect(row, col, size),
                strategy: PlacementStrategy::Grid,
            };
        }

        if let Some((row, col)) = self.find_stride(row_span, col_span) {
            log::info!(
                "grid exhausted for {}x{} cell block, stride placement at row {}, col {}",
                row_span,
                col_span,
                row,
                col
            );
            self.mark(row, col, row_span, col_span);
            return Placement {
                rect: self.cell_rect(row, col, size),
                strategy: PlacementStrategy::Stride,
            };
        }

        let max_x = (self.canvas.width - size.width).max(0.0);
        let max_y = (self.canvas.height - size.height).max(0.0);
        let x = rng.gen_range(0.0..=max_x);
        let y = rng.gen_range(0.0..=max_y);
        log::warn!(
            "{}x{} element spans {} columns on a {}-column grid, placed randomly at ({:.1}, {:.1})",
            size.width,
            size.height,
            col_span,
            self.cols,
            x,
            y
        );
        Placement {
            rect: Rect::new(x, y, size.width, size.height),
            strategy: PlacementStrategy::Random,
        }
    }

    /// First free block in row-major order.
    fn find_free(&self, row_span: usize, col_span: usize) -> Option<(usize, usize)> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .find(|&(row, col)| self.fits(row, col, row_span, col_span))
    }

    /// First stride-aligned block whose columns fit the grid. Occupancy is
    /// ignored.
    fn find_stride(&self, row_span: usize, col_span: usize) -> Option<(usize, usize)> {
        (0..self.rows)
            .step_by(row_span)
            .flat_map(|row| (0..self.cols).step_by(col_span).map(move |col| (row, col)))
            .find(|&(_, col)| col.saturating_add(col_span) <= self.cols)
    }
}

/// `ceil(length / cell)`, clamped to `1..=max`.
fn cells(length: f64, cell: f64, max: usize) -> usize {
    ((length / cell) - SPAN_EPSILON).ceil().clamp(1.0, max as f64) as usize
}
