//! Block downsampling of occupancy grids.
//!
//! The source grid is partitioned into `factor × factor` blocks (the last
//! block row/column is clipped at the grid edge). Each block collapses to a
//! single display cell using a fixed priority:
//!
//! ```text
//!   any value  > 0   → Occupied (100)
//!   else any  == -1  → Unknown  (-1)
//!   else             → Free     (0)
//! ```
//!
//! Occupied always wins so downsampling never hides an obstacle.

use crate::core::CellClass;
use crate::error::{DrishtiError, Result};

use super::occupancy::{OccupancyGrid, check_cell_buffer};
use super::reduced::ReducedGrid;

/// Downsample a snapshot for display.
///
/// `factor == 1` keeps the dimensions and only reclassifies values.
pub fn reduce(grid: &OccupancyGrid, factor: u32) -> Result<ReducedGrid> {
    reduce_raw(grid.cells(), grid.width(), grid.height(), factor)
}

/// Downsample a raw row-major buffer.
///
/// Fails with [`DrishtiError::InvalidArgument`] if `factor == 0`, if
/// `cells.len() != width * height`, or if a dimension is zero while `cells`
/// is non-empty.
pub fn reduce_raw(cells: &[i8], width: usize, height: usize, factor: u32) -> Result<ReducedGrid> {
    if factor == 0 {
        return Err(DrishtiError::invalid("downsample factor must be >= 1"));
    }
    check_cell_buffer(cells, width, height)?;

    let f = factor as usize;
    let reduced_width = width.div_ceil(f);
    let reduced_height = height.div_ceil(f);
    let mut classes = vec![CellClass::Free; reduced_width * reduced_height];

    // Single pass over the source: each cell folds into its block's slot.
    if width > 0 {
        for (row, src_row) in cells.chunks_exact(width).enumerate() {
            let base = (row / f) * reduced_width;
            let out_row = &mut classes[base..base + reduced_width];
            for (col, &raw) in src_row.iter().enumerate() {
                let slot = &mut out_row[col / f];
                *slot = slot.merge(CellClass::classify(raw));
            }
        }
    }

    tracing::debug!(
        "Reduced {}x{} grid by {} to {}x{}",
        width,
        height,
        factor,
        reduced_width,
        reduced_height
    );

    Ok(ReducedGrid::from_classes(reduced_width, reduced_height, classes))
}
