//! Collaborator interfaces consumed by the layout engine.
//!
//! The engine never owns cell content or scroll state. A [`SizeProvider`]
//! answers sizing questions per row and cell, and a [`ViewportProvider`]
//! reports where the viewport currently is.

use crate::geometry::{EdgeInsets, Point, Size};
use std::rc::Rc;

/// Supplies cell sizes and per-row spacing.
///
/// Implementations must be deterministic for a fixed grid generation:
/// the incremental refresh re-queries cells and expects the same answer
/// the full layout pass received.
pub trait SizeProvider {
    /// Intrinsic size of the cell at (`row`, `column`). A zero size is valid.
    fn size(&self, row: usize, column: usize) -> Size;

    /// Edge insets of `row`.
    fn insets(&self, _row: usize) -> EdgeInsets {
        EdgeInsets::ZERO
    }

    /// Horizontal gap between adjacent cells of `row`.
    fn interitem_spacing(&self, _row: usize) -> f64 {
        0.0
    }
}

/// Reports the current scroll state of the hosting viewport.
///
/// All rows are assumed to share [`ViewportProvider::row_height`].
pub trait ViewportProvider {
    /// Current scroll offset in content coordinates.
    fn scroll_offset(&self) -> Point;

    /// Size of the visible area.
    fn viewport_size(&self) -> Size;

    /// Uniform row height used for pinning and range estimation.
    fn row_height(&self) -> f64;
}

impl<T: SizeProvider + ?Sized> SizeProvider for &T {
    fn size(&self, row: usize, column: usize) -> Size {
        (**self).size(row, column)
    }

    fn insets(&self, row: usize) -> EdgeInsets {
        (**self).insets(row)
    }

    fn interitem_spacing(&self, row: usize) -> f64 {
        (**self).interitem_spacing(row)
    }
}

impl<T: SizeProvider + ?Sized> SizeProvider for Rc<T> {
    fn size(&self, row: usize, column: usize) -> Size {
        (**self).size(row, column)
    }

    fn insets(&self, row: usize) -> EdgeInsets {
        (**self).insets(row)
    }

    fn interitem_spacing(&self, row: usize) -> f64 {
        (**self).interitem_spacing(row)
    }
}

impl<T: SizeProvider + ?Sized> SizeProvider for Box<T> {
    fn size(&self, row: usize, column: usize) -> Size {
        (**self).size(row, column)
    }

    fn insets(&self, row: usize) -> EdgeInsets {
        (**self).insets(row)
    }

    fn interitem_spacing(&self, row: usize) -> f64 {
        (**self).interitem_spacing(row)
    }
}

impl<T: ViewportProvider + ?Sized> ViewportProvider for &T {
    fn scroll_offset(&self) -> Point {
        (**self).scroll_offset()
    }

    fn viewport_size(&self) -> Size {
        (**self).viewport_size()
    }

    fn row_height(&self) -> f64 {
        (**self).row_height()
    }
}

/// Every cell has the same size; every row the same spacing and leading inset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSizes {
    pub cell: Size,
    pub spacing: f64,
    pub leading_inset: f64,
}

impl UniformSizes {
    /// Uniform cells with no spacing or insets.
    pub fn new(cell: Size) -> Self {
        Self {
            cell,
            spacing: 0.0,
            leading_inset: 0.0,
        }
    }

    /// Set the inter-item spacing.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the leading (left) inset of every row.
    pub fn with_leading_inset(mut self, inset: f64) -> Self {
        self.leading_inset = inset;
        self
    }
}

impl SizeProvider for UniformSizes {
    fn size(&self, _row: usize, _column: usize) -> Size {
        self.cell
    }

    fn insets(&self, _row: usize) -> EdgeInsets {
        EdgeInsets::new(self.leading_inset, 0.0, 0.0, 0.0)
    }

    fn interitem_spacing(&self, _row: usize) -> f64 {
        self.spacing
    }
}

/// A plain viewport snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: Point,
    pub size: Size,
    pub row_height: f64,
}

impl ScrollState {
    /// Viewport at the origin.
    pub fn new(size: Size, row_height: f64) -> Self {
        Self {
            offset: Point::ZERO,
            size,
            row_height,
        }
    }

    /// Set an absolute scroll offset.
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.offset = Point::new(x, y);
    }

    /// Scroll by a delta.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }
}

impl ViewportProvider for ScrollState {
    fn scroll_offset(&self) -> Point {
        self.offset
    }

    fn viewport_size(&self) -> Size {
        self.size
    }

    fn row_height(&self) -> f64 {
        self.row_height
    }
}
