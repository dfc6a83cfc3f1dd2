//! Integration tests for the sticky grid layout.
//!
//! These exercise the public surface only:
//! - Coverage and range errors of `frame`
//! - Placement, content extent and pinning properties
//! - Layering, idempotence and invalidation

use stickygrid_core_layout::{
    CellCoord, EdgeInsets, GridShape, Layer, LayoutError, Rect, RefreshPolicy, ScrollState, Size,
    SizeProvider, StickyGridLayout, UniformSizes,
};

/// Cell widths vary by column, heights by row; rows carry insets and spacing.
struct Ragged;

impl SizeProvider for Ragged {
    fn size(&self, row: usize, column: usize) -> Size {
        Size::new(40.0 + (column % 3) as f64 * 15.5, 30.0 + (row % 2) as f64 * 10.0)
    }

    fn insets(&self, row: usize) -> EdgeInsets {
        EdgeInsets::new((row % 4) as f64 * 3.0, 0.0, 0.0, 0.0)
    }

    fn interitem_spacing(&self, row: usize) -> f64 {
        (row % 3) as f64 * 1.5
    }
}

fn ragged_shape() -> GridShape {
    GridShape::from_column_counts(vec![5, 3, 0, 7, 1, 4])
}

fn scenario_layout() -> StickyGridLayout<UniformSizes> {
    StickyGridLayout::new(UniformSizes::new(Size::new(100.0, 50.0)), GridShape::uniform(3, 3))
        .with_sticky(1, 1)
}

fn scenario_viewport() -> ScrollState {
    ScrollState::new(Size::new(300.0, 150.0), 50.0)
}

// ============================================================================
// Example scenarios
// ============================================================================

#[test]
fn test_scenario_baseline() {
    let mut layout = scenario_layout();

    assert_eq!(
        layout.frame(CellCoord::new(0, 0)),
        Ok(Rect::new(0.0, 0.0, 100.0, 50.0))
    );
    assert_eq!(
        layout.frame(CellCoord::new(1, 1)),
        Ok(Rect::new(100.0, 50.0, 100.0, 50.0))
    );
    assert_eq!(layout.content_extent(), Size::new(300.0, 150.0));
}

#[test]
fn test_scenario_scrolled() {
    let mut layout = scenario_layout();
    let mut viewport = scenario_viewport();
    viewport.scroll_to(20.0, 10.0);
    layout.prepare(&viewport);

    assert_eq!(
        layout.frame(CellCoord::new(0, 0)),
        Ok(Rect::new(20.0, 10.0, 100.0, 50.0))
    );
    assert_eq!(layout.layer(CellCoord::new(0, 0)), Ok(Layer::BothAxesSticky));

    assert_eq!(
        layout.frame(CellCoord::new(1, 0)),
        Ok(Rect::new(20.0, 50.0, 100.0, 50.0))
    );
    assert_eq!(layout.layer(CellCoord::new(1, 0)), Ok(Layer::AxisSticky));
}

#[test]
fn test_empty_grid() {
    let mut layout = StickyGridLayout::new(
        UniformSizes::new(Size::new(100.0, 50.0)),
        GridShape::empty(),
    )
    .with_sticky(1, 1);
    let mut viewport = scenario_viewport();
    viewport.scroll_to(10.0, 10.0);
    layout.prepare(&viewport);

    assert_eq!(layout.content_extent(), Size::ZERO);
    assert!(layout
        .frames_intersecting(Rect::new(-1.0e6, -1.0e6, 2.0e6, 2.0e6))
        .is_empty());
    assert_eq!(
        layout.frame(CellCoord::new(0, 0)),
        Err(LayoutError::OutOfRange { row: 0, column: 0 })
    );
}

// ============================================================================
// Properties
// ============================================================================

/// P1: every in-range coordinate resolves, everything else is out of range.
#[test]
fn test_coverage() {
    let shape = ragged_shape();
    let mut layout = StickyGridLayout::new(Ragged, shape.clone());

    for row in 0..shape.row_count() {
        for column in 0..shape.column_count(row) {
            assert!(layout.frame(CellCoord::new(row, column)).is_ok());
        }
        let past_end = CellCoord::new(row, shape.column_count(row));
        assert_eq!(
            layout.frame(past_end),
            Err(LayoutError::OutOfRange {
                row,
                column: past_end.column
            })
        );
    }
    assert!(layout.frame(CellCoord::new(shape.row_count(), 0)).is_err());
}

/// P2: cells within a row never overlap.
#[test]
fn test_monotonic_placement() {
    let shape = ragged_shape();
    let mut layout = StickyGridLayout::new(Ragged, shape.clone());

    for row in 0..shape.row_count() {
        let frames: Vec<Rect> = (0..shape.column_count(row))
            .filter_map(|column| layout.frame(CellCoord::new(row, column)).ok())
            .collect();
        for pair in frames.windows(2) {
            assert!(pair[0].right() <= pair[1].x, "row {row}: {pair:?}");
        }
    }
}

/// P3: the content extent is the far corner of the last placed frame.
#[test]
fn test_content_extent_matches_last_frame() {
    let shape = ragged_shape();
    let mut layout = StickyGridLayout::new(Ragged, shape.clone());

    let last_row = shape.row_count() - 1;
    let last = layout
        .frame(CellCoord::new(last_row, shape.column_count(last_row) - 1))
        .expect("last cell");
    assert_eq!(layout.content_extent(), Size::new(last.right(), last.bottom()));
}

/// P4: sticky rows sit at `scroll_y + row_height * row` whatever `scroll_x` is.
#[test]
fn test_sticky_rows_pinned() {
    let row_height = 40.0;
    let mut layout = StickyGridLayout::new(
        UniformSizes::new(Size::new(60.0, row_height)),
        GridShape::uniform(400, 12),
    )
    .with_sticky(3, 2);
    let mut viewport = ScrollState::new(Size::new(320.0, 480.0), row_height);

    for (sx, sy) in [(0.0, 0.0), (17.0, 5.0), (250.0, 3_333.0), (-40.0, 12_000.0)] {
        viewport.scroll_to(sx, sy);
        layout.prepare(&viewport);

        for row in 0..3 {
            for column in 0..12 {
                let frame = layout.frame(CellCoord::new(row, column)).expect("in range");
                assert_eq!(frame.y, sy + row_height * row as f64);
            }
        }
    }
}

/// P5: layers follow the sticky conditions exactly.
#[test]
fn test_layering_matches_sticky_conditions() {
    let shape = ragged_shape();
    let mut layout = StickyGridLayout::new(Ragged, shape.clone()).with_sticky(2, 2);
    let mut viewport = ScrollState::new(Size::new(200.0, 400.0), 35.0);
    viewport.scroll_to(12.0, 30.0);
    layout.prepare(&viewport);

    for row in 0..shape.row_count() {
        for column in 0..shape.column_count(row) {
            let layer = layout.layer(CellCoord::new(row, column)).expect("in range");
            let expected = match (row < 2, column < 2) {
                (true, true) => Layer::BothAxesSticky,
                (true, false) | (false, true) => Layer::AxisSticky,
                (false, false) => Layer::Normal,
            };
            assert_eq!(layer, expected, "cell ({row}, {column})");
        }
    }
}

/// P6: preparing twice at the same offset does not drift.
#[test]
fn test_translation_idempotent() {
    for policy in [RefreshPolicy::Eager, RefreshPolicy::VisibleWindow] {
        let mut layout = StickyGridLayout::with_policy(
            UniformSizes::new(Size::new(100.0, 100.0)),
            GridShape::uniform(1000, 30),
            policy,
        )
        .with_sticky(1, 1);
        let mut viewport = ScrollState::new(Size::new(375.0, 667.0), 100.0);
        viewport.scroll_to(55.0, 4_321.0);
        let everything = Rect::new(-1.0e7, -1.0e7, 2.0e7, 2.0e7);

        layout.prepare(&viewport);
        let first = layout.frames_intersecting(everything);
        layout.prepare(&viewport);
        let second = layout.frames_intersecting(everything);

        assert_eq!(first, second, "{policy:?}");
    }
}

/// P7: after invalidation a query re-lays the grid out from scratch.
#[test]
fn test_invalidate_matches_fresh_layout() {
    let shape = ragged_shape();
    let mut layout = StickyGridLayout::new(Ragged, shape.clone()).with_sticky(1, 1);
    let mut viewport = ScrollState::new(Size::new(200.0, 100.0), 35.0);
    viewport.scroll_to(25.0, 70.0);
    layout.prepare(&viewport);
    let before = layout.generation();

    layout.invalidate();
    let everything = Rect::new(-1.0e6, -1.0e6, 2.0e6, 2.0e6);
    let relaid = layout.frames_intersecting(everything);
    assert_eq!(layout.generation(), before + 1);

    let mut fresh = StickyGridLayout::new(Ragged, shape).with_sticky(1, 1);
    assert_eq!(relaid, fresh.frames_intersecting(everything));
    assert_eq!(layout.content_extent(), fresh.content_extent());
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_frames_intersecting_row_major() {
    let mut layout = StickyGridLayout::new(
        UniformSizes::new(Size::new(100.0, 50.0)),
        GridShape::uniform(4, 4),
    );

    let hits = layout.frames_intersecting(Rect::new(150.0, 60.0, 100.0, 50.0));
    let coords: Vec<_> = hits.iter().map(|attrs| attrs.coord).collect();
    assert_eq!(
        coords,
        vec![
            CellCoord::new(1, 1),
            CellCoord::new(1, 2),
            CellCoord::new(2, 1),
            CellCoord::new(2, 2),
        ]
    );
}

#[test]
fn test_frames_intersecting_sees_pinned_cells() {
    let mut layout = scenario_layout();
    let mut viewport = scenario_viewport();
    viewport.scroll_to(150.0, 90.0);
    layout.prepare(&viewport);

    // The top-left corner of the viewport: pinned cells overlap row 1.
    let hits = layout.frames_intersecting(Rect::new(150.0, 90.0, 10.0, 10.0));
    let coords: Vec<_> = hits.iter().map(|attrs| attrs.coord).collect();
    assert_eq!(
        coords,
        vec![
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
        ]
    );

    let topmost = hits.iter().max_by_key(|attrs| attrs.layer).map(|attrs| attrs.coord);
    assert_eq!(topmost, Some(CellCoord::new(0, 0)));
}

#[test]
fn test_large_grid_scroll_session() {
    let mut layout = StickyGridLayout::new(
        UniformSizes::new(Size::new(100.0, 100.0)),
        GridShape::uniform(1000, 30),
    )
    .with_sticky(1, 1);
    let mut viewport = ScrollState::new(Size::new(375.0, 667.0), 100.0);

    for _ in 0..200 {
        viewport.scroll_by(3.0, 250.0);
        layout.prepare(&viewport);
    }

    assert_eq!(layout.generation(), 1);
    let offset = viewport.offset;
    assert_eq!(
        layout.frame(CellCoord::new(0, 0)),
        Ok(Rect::new(offset.x, offset.y, 100.0, 100.0))
    );
    let row = (offset.y / 100.0) as usize + 2;
    assert_eq!(
        layout.frame(CellCoord::new(row, 0)),
        Ok(Rect::new(offset.x, row as f64 * 100.0, 100.0, 100.0))
    );
    assert_eq!(layout.content_extent(), Size::new(3000.0, 100_000.0));
}
