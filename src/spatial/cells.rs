//! Placement cell grid ordered from the visual centre outward

use crate::io::configuration::MIN_INITIAL_RADIUS;
use crate::spatial::layout::LayoutParameters;

/// One `cell_size` square of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

/// Cells of a canvas split into the synchronously processed centre and the rest
#[derive(Debug, Clone)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cell_size: i32,
    ordered: Vec<Cell>,
    initial_len: usize,
}

impl CellGrid {
    /// Partition the canvas into cells sorted by Manhattan distance from the centre
    ///
    /// The sort is stable, so cells at equal distance keep row-major order.
    pub fn new(params: &LayoutParameters) -> Self {
        let cell_size = params.cell_size.max(1);
        let cols = (params.canvas_width / cell_size).max(1) as usize;
        let rows = (params.canvas_height / cell_size).max(1) as usize;
        let centre = Cell {
            row: rows / 2,
            col: cols / 2,
        };

        let mut ordered: Vec<Cell> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell { row, col }))
            .collect();
        ordered.sort_by_key(|cell| manhattan(*cell, centre));

        let radius = initial_radius(rows, cols);
        let initial_len = ordered
            .iter()
            .take_while(|cell| manhattan(**cell, centre) <= radius)
            .count();

        Self {
            rows,
            cols,
            cell_size,
            ordered,
            initial_len,
        }
    }

    /// Number of cell rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the grid has no cells (never true for a valid layout)
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// All cells, centre first
    pub fn ordered(&self) -> &[Cell] {
        &self.ordered
    }

    /// Centre cells processed before the first cooperative pause
    pub fn initial(&self) -> &[Cell] {
        self.ordered.get(..self.initial_len).unwrap_or(&[])
    }

    /// Outer cells processed in batches
    pub fn remaining(&self) -> &[Cell] {
        self.ordered.get(self.initial_len..).unwrap_or(&[])
    }

    /// Top-left canvas pixel of a cell
    pub const fn origin(&self, cell: Cell) -> (i32, i32) {
        (
            cell.col as i32 * self.cell_size,
            cell.row as i32 * self.cell_size,
        )
    }
}

/// Manhattan distance between two cells
pub const fn manhattan(a: Cell, b: Cell) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Radius of the centre region shown before any pause
pub fn initial_radius(rows: usize, cols: usize) -> usize {
    (rows.min(cols) / 10).max(MIN_INITIAL_RADIUS)
}
