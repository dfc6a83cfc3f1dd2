//! The sticky grid layout: lifecycle, layout cycle and queries.

use crate::geometry::{CellCoord, Rect, Size};
use crate::grid::{GridShape, Layer, StickyConfig};
use crate::provider::{SizeProvider, ViewportProvider};
use crate::refresh::refresh_sticky_columns;
use crate::store::{GeometryStore, MissingEntry};
use crate::translate::translate;
use crate::visible_range::visible_range;
use crate::LayoutError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// How much geometry a layout cycle re-derives once the grid is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Run the full layout pass on every cycle.
    Eager,
    /// Run the full layout pass once, then refresh only the sticky columns
    /// of rows near the viewport.
    #[default]
    VisibleWindow,
}

/// Frame and layer of one cell, as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellAttributes {
    pub coord: CellCoord,
    pub frame: Rect,
    pub layer: Layer,
}

/// Computes cell frames for a grid whose leading rows and columns stay
/// pinned while the rest of the grid scrolls.
///
/// The layout holds its [`SizeProvider`] for its whole lifetime; pass a
/// reference or an `Rc` to keep ownership with the caller. Scroll state is
/// read from the [`ViewportProvider`] given to each [`prepare`] call.
///
/// [`prepare`]: StickyGridLayout::prepare
#[derive(Debug)]
pub struct StickyGridLayout<S> {
    sizes: S,
    shape: GridShape,
    sticky: StickyConfig,
    policy: RefreshPolicy,
    store: GeometryStore,
}

impl<S: SizeProvider> StickyGridLayout<S> {
    /// Create a layout with no sticky rows or columns and the
    /// [`RefreshPolicy::VisibleWindow`] policy.
    pub fn new(sizes: S, shape: GridShape) -> Self {
        Self::with_policy(sizes, shape, RefreshPolicy::default())
    }

    /// Create a layout with an explicit refresh policy.
    pub fn with_policy(sizes: S, shape: GridShape, policy: RefreshPolicy) -> Self {
        Self {
            sizes,
            shape,
            sticky: StickyConfig::default(),
            policy,
            store: GeometryStore::new(),
        }
    }

    /// Builder-style sticky configuration.
    pub fn with_sticky(mut self, rows: usize, columns: usize) -> Self {
        self.set_sticky(StickyConfig::new(rows, columns));
        self
    }

    pub fn sizes(&self) -> &S {
        &self.sizes
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// The sticky configuration as requested by the caller.
    pub fn sticky(&self) -> StickyConfig {
        self.sticky
    }

    pub fn sticky_rows(&self) -> usize {
        self.sticky.rows
    }

    pub fn sticky_columns(&self) -> usize {
        self.sticky.columns
    }

    /// Number of full layout passes run so far.
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    /// Whether the geometry store currently holds a laid-out grid.
    pub fn is_valid(&self) -> bool {
        self.store.is_populated()
    }

    /// Set the number of pinned leading rows. Invalidates the layout.
    pub fn set_sticky_rows(&mut self, rows: usize) {
        self.sticky.rows = rows;
        self.invalidate();
    }

    /// Set the number of pinned leading columns. Invalidates the layout.
    pub fn set_sticky_columns(&mut self, columns: usize) {
        self.sticky.columns = columns;
        self.invalidate();
    }

    /// Replace both sticky counts at once. Invalidates the layout.
    pub fn set_sticky(&mut self, sticky: StickyConfig) {
        self.sticky = sticky;
        self.invalidate();
    }

    /// Replace the grid shape. Invalidates the layout.
    pub fn set_grid_shape(&mut self, shape: GridShape) {
        self.shape = shape;
        self.invalidate();
    }

    /// Discard all computed geometry. The next query or layout cycle runs a
    /// full layout pass.
    pub fn invalidate(&mut self) {
        if self.store.is_populated() {
            debug!(generation = self.store.generation(), "layout invalidated");
        }
        self.store.clear();
    }

    /// Explicit reset, for callers that know the data behind the grid changed.
    pub fn reset_layout(&mut self) {
        self.invalidate();
    }

    /// Check if the cell lies in a sticky row or a sticky column.
    pub fn is_item_sticky(&self, at: CellCoord) -> bool {
        self.sticky.is_sticky(at)
    }

    /// Run one layout cycle against the current viewport state.
    ///
    /// Lays the grid out from scratch when needed (or always, under
    /// [`RefreshPolicy::Eager`]), refreshes sticky-column geometry for the
    /// rows near the viewport, then pins sticky cells to the scroll offset.
    pub fn prepare<V>(&mut self, viewport: &V)
    where
        V: ViewportProvider + ?Sized,
    {
        match self.policy {
            RefreshPolicy::Eager => self.full_pass(),
            RefreshPolicy::VisibleWindow if !self.store.is_populated() => self.full_pass(),
            RefreshPolicy::VisibleWindow => self.refresh(viewport),
        }

        let sticky = self.effective_sticky();
        match translate(&mut self.store, &self.shape, sticky, viewport) {
            Ok(touched) => trace!(touched, "translated sticky cells"),
            Err(missing) => {
                self.heal(missing);
                if let Err(MissingEntry(coord)) =
                    translate(&mut self.store, &self.shape, sticky, viewport)
                {
                    warn!(
                        row = coord.row,
                        column = coord.column,
                        "store still inconsistent after re-layout"
                    );
                }
            }
        }
    }

    /// Current frame of a cell.
    pub fn frame(&mut self, at: CellCoord) -> Result<Rect, LayoutError> {
        self.attributes(at).map(|attrs| attrs.frame)
    }

    /// Current layering tag of a cell.
    pub fn layer(&mut self, at: CellCoord) -> Result<Layer, LayoutError> {
        self.attributes(at).map(|attrs| attrs.layer)
    }

    /// Current frame and layer of a cell.
    pub fn attributes(&mut self, at: CellCoord) -> Result<CellAttributes, LayoutError> {
        if !self.shape.contains(at) {
            return Err(LayoutError::OutOfRange {
                row: at.row,
                column: at.column,
            });
        }
        self.ensure_laid_out();

        self.store
            .get(at)
            .map(|cell| CellAttributes {
                coord: at,
                frame: cell.frame,
                layer: cell.layer,
            })
            .ok_or(LayoutError::OutOfRange {
                row: at.row,
                column: at.column,
            })
    }

    /// Every cell whose current frame intersects `rect`, in row-major order.
    pub fn frames_intersecting(&mut self, rect: Rect) -> Vec<CellAttributes> {
        self.ensure_laid_out();

        self.store
            .iter()
            .filter(|(_, cell)| cell.frame.intersects(&rect))
            .map(|(coord, cell)| CellAttributes {
                coord,
                frame: cell.frame,
                layer: cell.layer,
            })
            .collect()
    }

    /// Total size of the laid-out grid.
    pub fn content_extent(&mut self) -> Size {
        self.ensure_laid_out();
        self.store.content_extent()
    }

    /// Sticky counts clamped to the grid: rows to the row count, columns to
    /// the widest row. Per-row column clamping happens in the passes.
    fn effective_sticky(&self) -> StickyConfig {
        let widest = (0..self.shape.row_count())
            .map(|row| self.shape.column_count(row))
            .max()
            .unwrap_or(0);
        StickyConfig::new(
            self.sticky.rows.min(self.shape.row_count()),
            self.sticky.columns.min(widest),
        )
    }

    fn ensure_laid_out(&mut self) {
        if !self.store.is_populated() {
            self.full_pass();
        }
    }

    fn full_pass(&mut self) {
        let sticky = self.effective_sticky();
        self.store.populate(&self.shape, sticky, &self.sizes);
    }

    fn refresh<V>(&mut self, viewport: &V)
    where
        V: ViewportProvider + ?Sized,
    {
        let window = visible_range(
            viewport.scroll_offset().y,
            viewport.viewport_size().height,
            viewport.row_height(),
            self.shape.row_count(),
            0,
        );
        let Some(rows) = window else {
            trace!("degenerate viewport, skipping sticky refresh");
            return;
        };

        let sticky = self.effective_sticky();
        match refresh_sticky_columns(&mut self.store, &self.shape, sticky, &self.sizes, rows) {
            Ok(refreshed) => trace!(refreshed, "refreshed sticky columns"),
            Err(missing) => self.heal(missing),
        }
    }

    /// Recover from a store that no longer matches the grid shape.
    fn heal(&mut self, MissingEntry(coord): MissingEntry) {
        warn!(
            row = coord.row,
            column = coord.column,
            "geometry store is missing a cell, rebuilding layout"
        );
        self.invalidate();
        self.full_pass();
    }
}
