//! Reduced-resolution display grid.

use serde::{Deserialize, Serialize};

use crate::core::{CellClass, GridCell};

/// Cell counts by display class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub unknown: usize,
    pub free: usize,
    pub occupied: usize,
}

impl CellCounts {
    /// Total known cells.
    pub fn known(&self) -> usize {
        self.free + self.occupied
    }

    /// Total cells.
    pub fn total(&self) -> usize {
        self.unknown + self.known()
    }
}

/// Downsampled grid ready for rasterization.
///
/// Derived from one occupancy snapshot and one factor. Never mutated; a new
/// snapshot produces a new `ReducedGrid`. Cell values are limited to
/// -1 / 0 / 100 and use the same row convention as the source grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedGrid {
    width: usize,
    height: usize,
    cells: Vec<i8>,
}

impl ReducedGrid {
    pub(crate) fn from_classes(width: usize, height: usize, classes: Vec<CellClass>) -> Self {
        debug_assert_eq!(classes.len(), width * height);
        Self {
            width,
            height,
            cells: classes.into_iter().map(CellClass::value).collect(),
        }
    }

    /// Width in reduced cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in reduced cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Aggregated values (-1, 0, 100), row-major.
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Aggregated value at a cell, `None` outside the grid.
    pub fn get(&self, cell: GridCell) -> Option<i8> {
        cell.index_in(self.width, self.height).map(|i| self.cells[i])
    }

    /// Display class at a cell, `None` outside the grid.
    pub fn class_at(&self, cell: GridCell) -> Option<CellClass> {
        self.get(cell).map(CellClass::classify)
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCell, CellClass)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, &v)| {
            let cell = GridCell::new((i % width) as i32, (i / width) as i32);
            (cell, CellClass::classify(v))
        })
    }

    /// Count cells per class.
    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &v in &self.cells {
            match CellClass::classify(v) {
                CellClass::Unknown => counts.unknown += 1,
                CellClass::Free => counts.free += 1,
                CellClass::Occupied => counts.occupied += 1,
            }
        }
        counts
    }

    /// Raster size in pixels (width, height) at the given cell size.
    pub fn screen_size(&self, cell_pixel_size: f32) -> (f32, f32) {
        (
            self.width as f32 * cell_pixel_size,
            self.height as f32 * cell_pixel_size,
        )
    }

    /// Text rendering with the top row first, as it appears on screen.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in (0..self.height).rev() {
            let start = row * self.width;
            out.extend(
                self.cells[start..start + self.width]
                    .iter()
                    .map(|&v| CellClass::classify(v).as_char()),
            );
            out.push('\n');
        }
        out
    }
}
