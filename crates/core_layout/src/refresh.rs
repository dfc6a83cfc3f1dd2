//! Incremental refresh of sticky-column geometry for the visible row window.

use crate::geometry::CellCoord;
use crate::grid::{GridShape, StickyConfig};
use crate::provider::SizeProvider;
use crate::store::{place_row, GeometryStore, MissingEntry};
use std::ops::Range;

/// Recompute the baseline of sticky-column cells in `rows`.
///
/// Only columns `[0, sticky.columns)` are re-derived, except row 0 which is
/// refreshed in full. Each recomputed frame replaces an existing entry; the
/// displayed frame is reset to the new baseline and left for the translator
/// to pin. Returns the number of cells refreshed.
///
/// A coordinate of `shape` without a store entry means the store was built
/// for a different grid. The refresh stops at the first such coordinate and
/// reports it.
pub(crate) fn refresh_sticky_columns<S>(
    store: &mut GeometryStore,
    shape: &GridShape,
    sticky: StickyConfig,
    sizes: &S,
    rows: Range<usize>,
) -> Result<usize, MissingEntry>
where
    S: SizeProvider + ?Sized,
{
    let mut refreshed = 0;

    for row in rows {
        let columns = shape.column_count(row);
        let count = if row == 0 {
            columns
        } else {
            sticky.columns.min(columns)
        };
        if count == 0 {
            continue;
        }

        let origin_y = store
            .row(row)
            .map(|stored| stored.origin_y)
            .ok_or(MissingEntry(CellCoord::new(row, 0)))?;

        for (column, frame) in place_row(sizes, row, count, origin_y).into_iter().enumerate() {
            let coord = CellCoord::new(row, column);
            let cell = store.get_mut(coord).ok_or(MissingEntry(coord))?;
            cell.baseline = frame;
            cell.frame = frame;
            refreshed += 1;
        }
    }

    if refreshed > 0 {
        store.recompute_content_extent();
    }
    Ok(refreshed)
}
