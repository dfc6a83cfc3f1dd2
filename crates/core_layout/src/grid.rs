//! Grid shape, sticky configuration and layering tags.

use crate::geometry::CellCoord;
use serde::{Deserialize, Serialize};

/// Number of rows and the column count of each row.
///
/// Rows may have different column counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    columns: Vec<usize>,
}

impl GridShape {
    /// Create an empty grid (no rows).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a grid where every row has the same number of columns.
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self {
            columns: vec![columns; rows],
        }
    }

    /// Create a grid from explicit per-row column counts.
    pub fn from_column_counts(columns: Vec<usize>) -> Self {
        Self { columns }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of columns in `row`, or 0 when the row does not exist.
    pub fn column_count(&self, row: usize) -> usize {
        self.columns.get(row).copied().unwrap_or(0)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.columns.iter().sum()
    }

    /// Check if the grid holds no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Check if a coordinate lies inside the grid.
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.column < self.column_count(coord.row)
    }
}

/// Leading rows and columns pinned to the viewport edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickyConfig {
    pub rows: usize,
    pub columns: usize,
}

impl StickyConfig {
    /// Create a sticky configuration.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Check if `row` is pinned vertically.
    pub fn is_sticky_row(&self, row: usize) -> bool {
        row < self.rows
    }

    /// Check if `column` is pinned horizontally.
    pub fn is_sticky_column(&self, column: usize) -> bool {
        column < self.columns
    }

    /// Check if a cell is pinned on at least one axis.
    pub fn is_sticky(&self, coord: CellCoord) -> bool {
        self.is_sticky_row(coord.row) || self.is_sticky_column(coord.column)
    }

    /// Layering tag for a cell under this configuration.
    pub fn layer(&self, coord: CellCoord) -> Layer {
        match (
            self.is_sticky_row(coord.row),
            self.is_sticky_column(coord.column),
        ) {
            (true, true) => Layer::BothAxesSticky,
            (true, false) | (false, true) => Layer::AxisSticky,
            (false, false) => Layer::Normal,
        }
    }
}

/// Draw-order class of a cell.
///
/// Variants are ordered bottom to top: a cell pinned on both axes draws
/// above a cell pinned on one axis, which draws above a normal cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Scrolls with the content.
    #[default]
    Normal,
    /// Pinned on exactly one axis.
    AxisSticky,
    /// Pinned on both axes (the top-left corner block).
    BothAxesSticky,
}

impl Layer {
    /// Numeric z-index for renderers that sort by integer.
    pub fn z_index(self) -> i32 {
        match self {
            Layer::Normal => 0,
            Layer::AxisSticky => 1,
            Layer::BothAxesSticky => 2,
        }
    }
}
