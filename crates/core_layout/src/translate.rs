//! Pinning of sticky rows and columns to the current scroll offset.

use crate::geometry::CellCoord;
use crate::grid::{GridShape, StickyConfig};
use crate::provider::ViewportProvider;
use crate::store::{GeometryStore, MissingEntry};
use crate::visible_range::visible_range;

/// Rewrite the displayed position of sticky cells and refresh their layers.
///
/// Positions are always derived from the stored baseline, so translating
/// twice with the same offset yields the same frames. Sizes are never
/// touched.
///
/// - sticky rows: `y = scroll_y + row_height * row`
/// - sticky rows × sticky columns: also `x = scroll_x + sum of the
///   baseline widths of the preceding columns in that row`
/// - sticky columns of rows in the visible window below the sticky rows:
///   `x = baseline_x + scroll_x`
///
/// With a degenerate viewport (non-finite offset, non-positive row height)
/// no position is pinned; sticky rows fall back to their baseline and only
/// the layers are refreshed. Returns the number of cells touched.
pub(crate) fn translate<V>(
    store: &mut GeometryStore,
    shape: &GridShape,
    sticky: StickyConfig,
    viewport: &V,
) -> Result<usize, MissingEntry>
where
    V: ViewportProvider + ?Sized,
{
    let offset = viewport.scroll_offset();
    let row_height = viewport.row_height();
    let can_pin = offset.is_finite() && row_height.is_finite() && row_height > 0.0;
    let mut touched = 0;

    for row in 0..sticky.rows.min(shape.row_count()) {
        let stored = store
            .row_mut(row)
            .ok_or(MissingEntry(CellCoord::new(row, 0)))?;
        if stored.cells.len() < shape.column_count(row) {
            return Err(MissingEntry(CellCoord::new(row, stored.cells.len())));
        }

        let mut leading_width = 0.0;
        for (column, cell) in stored.cells.iter_mut().enumerate() {
            let mut frame = cell.baseline;
            if can_pin {
                frame.y = offset.y + row_height * row as f64;
                if sticky.is_sticky_column(column) {
                    frame.x = offset.x + leading_width;
                }
            }
            leading_width += cell.baseline.width;

            cell.frame = frame;
            cell.layer = sticky.layer(CellCoord::new(row, column));
            touched += 1;
        }
    }

    if sticky.columns == 0 || !can_pin {
        return Ok(touched);
    }

    let window = visible_range(
        offset.y,
        viewport.viewport_size().height,
        row_height,
        shape.row_count(),
        sticky.rows,
    );
    let Some(rows) = window else {
        return Ok(touched);
    };

    for row in rows {
        let pinned = sticky.columns.min(shape.column_count(row));
        for column in 0..pinned {
            let coord = CellCoord::new(row, column);
            let cell = store.get_mut(coord).ok_or(MissingEntry(coord))?;
            cell.frame = cell.baseline;
            cell.frame.x = cell.baseline.x + offset.x;
            cell.layer = sticky.layer(coord);
            touched += 1;
        }
    }

    Ok(touched)
}
