//! Estimation of the row window that needs re-derivation on a scroll tick.
//!
//! Rows are assumed to share one height, so the window is a direct division
//! of the scroll offset instead of a search over row positions.

use std::ops::Range;

/// Extra rows past the bottom edge of the viewport, so a fast scroll does
/// not reveal a row whose sticky cells were never refreshed.
pub const ROW_PADDING: usize = 1;

/// Compute the half-open range of rows that are in or near the viewport.
///
/// - `scroll_offset`: vertical scroll offset of the viewport
/// - `viewport_height`: visible height
/// - `row_height`: uniform row height
/// - `row_count`: number of rows in the grid
/// - `minimum_row`: the range never starts before this row (callers pass the
///   sticky row count to skip rows that are pinned separately)
///
/// Returns `None` for a degenerate viewport (non-positive or non-finite row
/// height, non-finite scroll offset, a viewport height that is not a valid
/// index) and when the lower bound lands past the upper bound. `None` means
/// "no incremental work", never an error.
pub fn visible_range(
    scroll_offset: f64,
    viewport_height: f64,
    row_height: f64,
    row_count: usize,
    minimum_row: usize,
) -> Option<Range<usize>> {
    if !row_height.is_finite() || row_height <= 0.0 {
        return None;
    }
    if !scroll_offset.is_finite() {
        return None;
    }
    // Overflow guard: the height has to be representable in the index domain.
    if !viewport_height.is_finite() || viewport_height > usize::MAX as f64 {
        return None;
    }

    let lower = clamped_index((scroll_offset / row_height).floor(), row_count);
    let count = clamped_index((viewport_height / row_height).ceil(), row_count);
    let upper = lower.saturating_add(count).saturating_add(ROW_PADDING);

    let lower_bound = minimum_row.max(lower);
    let upper_bound = upper.min(row_count);

    if lower_bound > upper_bound {
        return None;
    }
    Some(lower_bound..upper_bound)
}

/// Convert a whole-number float to an index clamped to `[0, max]`.
fn clamped_index(value: f64, max: usize) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= max as f64 {
        max
    } else {
        value as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_at_top() {
        // 667 / 100 = 6.67 -> 7 visible rows, plus one row of padding
        assert_eq!(visible_range(0.0, 667.0, 100.0, 1000, 0), Some(0..8));
    }

    #[test]
    fn test_range_respects_minimum_row() {
        assert_eq!(visible_range(0.0, 667.0, 100.0, 1000, 1), Some(1..8));
    }

    #[test]
    fn test_range_mid_scroll() {
        assert_eq!(visible_range(250.0, 667.0, 100.0, 1000, 0), Some(2..10));
    }

    #[test]
    fn test_range_clamped_at_bottom() {
        assert_eq!(visible_range(99_900.0, 667.0, 100.0, 1000, 0), Some(999..1000));
    }

    #[test]
    fn test_range_scrolled_past_end_is_empty() {
        let range = visible_range(1.0e9, 667.0, 100.0, 1000, 0);
        assert_eq!(range, Some(1000..1000));
        assert!(range.is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn test_negative_scroll_clamps_to_zero() {
        assert_eq!(visible_range(-500.0, 200.0, 100.0, 10, 0), Some(0..3));
    }

    #[test]
    fn test_minimum_past_upper_bound() {
        assert_eq!(visible_range(0.0, 100.0, 100.0, 3, 5), None);
    }

    #[test]
    fn test_degenerate_row_height() {
        assert_eq!(visible_range(0.0, 667.0, 0.0, 1000, 0), None);
        assert_eq!(visible_range(0.0, 667.0, -10.0, 1000, 0), None);
        assert_eq!(visible_range(0.0, 667.0, f64::NAN, 1000, 0), None);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert_eq!(visible_range(f64::NAN, 667.0, 100.0, 1000, 0), None);
        assert_eq!(visible_range(f64::INFINITY, 667.0, 100.0, 1000, 0), None);
        assert_eq!(visible_range(0.0, f64::INFINITY, 100.0, 1000, 0), None);
        assert_eq!(visible_range(0.0, 1.0e300, 100.0, 1000, 0), None);
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(visible_range(0.0, 667.0, 100.0, 0, 0), Some(0..0));
    }

    #[test]
    fn test_negative_viewport_height_counts_as_zero() {
        assert_eq!(visible_range(200.0, -50.0, 100.0, 10, 0), Some(2..3));
    }
}
