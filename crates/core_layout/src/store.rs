//! Geometry store and the full layout pass that populates it.

use crate::geometry::{CellCoord, Point, Rect, Size};
use crate::grid::{GridShape, Layer, StickyConfig};
use crate::provider::SizeProvider;
use tracing::debug;

/// Computed geometry of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StoredCell {
    /// Frame as if no scrolling had occurred.
    pub(crate) baseline: Rect,
    /// Frame handed to the renderer (baseline, or pinned by the translator).
    pub(crate) frame: Rect,
    pub(crate) layer: Layer,
}

impl StoredCell {
    fn new(baseline: Rect, layer: Layer) -> Self {
        Self {
            baseline,
            frame: baseline,
            layer,
        }
    }
}

/// One row of stored cells plus the row's baseline y-coordinate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoredRow {
    pub(crate) origin_y: f64,
    pub(crate) cells: Vec<StoredCell>,
}

/// A cell coordinate the store should hold but does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MissingEntry(pub(crate) CellCoord);

/// In-memory table of frames and layering tags, indexed by row then column.
///
/// The store is either empty (layout invalid) or holds an entry for every
/// coordinate of the grid shape it was built from.
#[derive(Debug, Clone, Default)]
pub struct GeometryStore {
    rows: Vec<StoredRow>,
    content_extent: Size,
    generation: u64,
    populated: bool,
}

impl GeometryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a full layout pass has populated the store since the last clear.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Number of full layout passes run over the lifetime of the store.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total size of the laid-out grid. Zero while the store is empty.
    pub fn content_extent(&self) -> Size {
        self.content_extent
    }

    /// Number of stored rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Discard every entry.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.content_extent = Size::ZERO;
        self.populated = false;
    }

    /// Run the full layout pass: compute every frame of `shape` from scratch.
    ///
    /// The new table is assembled off to the side and swapped in only once it
    /// is complete.
    pub fn populate<S>(&mut self, shape: &GridShape, sticky: StickyConfig, sizes: &S)
    where
        S: SizeProvider + ?Sized,
    {
        let mut rows = Vec::with_capacity(shape.row_count());
        let mut origin_y = 0.0;

        for row in 0..shape.row_count() {
            let frames = place_row(sizes, row, shape.column_count(row), origin_y);
            let row_height = frames.last().map_or(0.0, |f| f.height);

            let cells = frames
                .into_iter()
                .enumerate()
                .map(|(column, frame)| {
                    StoredCell::new(frame, sticky.layer(CellCoord::new(row, column)))
                })
                .collect();
            rows.push(StoredRow { origin_y, cells });

            origin_y += row_height;
        }

        self.rows = rows;
        self.populated = true;
        self.generation += 1;
        self.recompute_content_extent();

        debug!(
            rows = shape.row_count(),
            cells = shape.cell_count(),
            generation = self.generation,
            width = self.content_extent.width,
            height = self.content_extent.height,
            "full layout pass"
        );
    }

    /// Recompute the content extent from the last placed baseline frame.
    pub(crate) fn recompute_content_extent(&mut self) {
        self.content_extent = self
            .rows
            .iter()
            .rev()
            .find_map(|row| row.cells.last())
            .map_or(Size::ZERO, |cell| {
                Size::new(cell.baseline.right(), cell.baseline.bottom())
            });
    }

    pub(crate) fn row(&self, row: usize) -> Option<&StoredRow> {
        self.rows.get(row)
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut StoredRow> {
        self.rows.get_mut(row)
    }

    pub(crate) fn get(&self, coord: CellCoord) -> Option<&StoredCell> {
        self.rows
            .get(coord.row)
            .and_then(|row| row.cells.get(coord.column))
    }

    pub(crate) fn get_mut(&mut self, coord: CellCoord) -> Option<&mut StoredCell> {
        self.rows
            .get_mut(coord.row)
            .and_then(|row| row.cells.get_mut(coord.column))
    }

    /// Every stored cell in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellCoord, &StoredCell)> {
        self.rows.iter().enumerate().flat_map(|(row, stored)| {
            stored
                .cells
                .iter()
                .enumerate()
                .map(move |(column, cell)| (CellCoord::new(row, column), cell))
        })
    }
}

/// Place the first `columns` cells of `row` with the horizontal cursor.
///
/// The cursor starts at the row's left inset and advances by each cell's
/// width plus the row's inter-item spacing. Sizes and positions are floored
/// so neighbouring cells never overlap on sub-pixel boundaries.
pub(crate) fn place_row<S>(sizes: &S, row: usize, columns: usize, origin_y: f64) -> Vec<Rect>
where
    S: SizeProvider + ?Sized,
{
    let spacing = sizes.interitem_spacing(row);
    let mut cursor = sizes.insets(row).left;
    let mut frames = Vec::with_capacity(columns);

    for column in 0..columns {
        let size = sizes.size(row, column).floored();
        let origin = Point::new(cursor.floor(), origin_y.floor());
        frames.push(Rect::from_origin_size(origin, size));
        cursor += size.width + spacing;
    }

    frames
}
