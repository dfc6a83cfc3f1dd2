//! Sticky Grid Core Layout Engine
//!
//! Platform-agnostic geometry for a scrollable grid whose leading rows and
//! columns stay pinned to the viewport edges.
//!
//! This crate implements the layout model where:
//! - Every cell gets a frame from a full layout pass over the grid
//! - Sticky rows and columns are re-pinned to the scroll offset every cycle
//! - Large grids only re-derive the sticky cells of rows near the viewport
//!
//! Rendering, cell recycling and input are left to the host.

mod geometry;
mod grid;
mod layout;
mod provider;
mod refresh;
mod store;
mod translate;
mod visible_range;

use thiserror::Error;

pub use geometry::{CellCoord, EdgeInsets, Point, Rect, Size};
pub use grid::{GridShape, Layer, StickyConfig};
pub use layout::{CellAttributes, RefreshPolicy, StickyGridLayout};
pub use provider::{ScrollState, SizeProvider, UniformSizes, ViewportProvider};
pub use store::GeometryStore;
pub use visible_range::{visible_range, ROW_PADDING};

/// Errors that can occur during layout queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Cell ({row}, {column}) is outside the grid")]
    OutOfRange { row: usize, column: usize },
}
