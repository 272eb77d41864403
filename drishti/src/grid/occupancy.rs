//! Full-resolution occupancy grid snapshot.

use serde::{Deserialize, Serialize};

use crate::core::{CellClass, GridCell, OCCUPIED_VALUE, Pose, UNKNOWN_VALUE, WorldPoint};
use crate::error::{DrishtiError, Result};

/// Grid metadata: everything about a snapshot except its cell values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    /// World units per cell
    pub resolution: f32,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    /// World pose of cell (0, 0)'s corner
    pub origin: Pose,
}

impl MapMetadata {
    /// Metadata with an axis-aligned origin.
    pub fn new(resolution: f32, width: usize, height: usize, origin: WorldPoint) -> Self {
        Self {
            resolution,
            width,
            height,
            origin: Pose {
                position: origin,
                heading: None,
            },
        }
    }

    /// Number of cells the data buffer must hold.
    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// World bounds: (min_point, max_point)
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        let min = self.origin.position;
        let max = WorldPoint::new(
            min.x + self.width as f32 * self.resolution,
            min.y + self.height as f32 * self.resolution,
        );
        (min, max)
    }

    /// Reject metadata the transforms cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(DrishtiError::invalid(format!(
                "resolution must be positive, got {}",
                self.resolution
            )));
        }
        if !self.origin.is_finite() {
            return Err(DrishtiError::invalid("origin must be finite"));
        }
        if self.cell_count().is_none() {
            return Err(DrishtiError::invalid(format!(
                "grid dimensions {}x{} overflow",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Immutable occupancy grid snapshot.
///
/// Cells are row-major (`index = row * width + col`) with row 0 at the
/// world-frame "south" edge. Values: -1 unknown, 0 free, 1..=100 occupancy
/// probability.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    metadata: MapMetadata,
    cells: Vec<i8>,
}

impl OccupancyGrid {
    /// Build a validated snapshot.
    ///
    /// Fails with [`DrishtiError::InvalidArgument`] on non-positive resolution,
    /// a data length that does not match `width * height`, or values outside
    /// `[-1, 100]`.
    pub fn new(metadata: MapMetadata, cells: Vec<i8>) -> Result<Self> {
        metadata.validate()?;
        check_cell_buffer(&cells, metadata.width, metadata.height)?;

        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|&(_, &v)| !(UNKNOWN_VALUE..=OCCUPIED_VALUE).contains(&v))
        {
            return Err(DrishtiError::invalid(format!(
                "cell {} has value {} outside [-1, 100]",
                index, value
            )));
        }

        Ok(Self { metadata, cells })
    }

    /// Grid filled with a single value.
    pub fn filled(metadata: MapMetadata, value: i8) -> Result<Self> {
        let count = metadata
            .cell_count()
            .ok_or_else(|| DrishtiError::invalid("grid dimensions overflow"))?;
        Self::new(metadata, vec![value; count])
    }

    pub fn metadata(&self) -> &MapMetadata {
        &self.metadata
    }

    pub fn resolution(&self) -> f32 {
        self.metadata.resolution
    }

    pub fn width(&self) -> usize {
        self.metadata.width
    }

    pub fn height(&self) -> usize {
        self.metadata.height
    }

    pub fn origin(&self) -> Pose {
        self.metadata.origin
    }

    /// Raw cell values, row-major.
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Raw value at a cell, `None` outside the grid.
    pub fn get(&self, cell: GridCell) -> Option<i8> {
        cell.index_in(self.metadata.width, self.metadata.height)
            .map(|i| self.cells[i])
    }

    /// Display class at a cell, `None` outside the grid.
    pub fn class_at(&self, cell: GridCell) -> Option<CellClass> {
        self.get(cell).map(CellClass::classify)
    }
}

/// Shared length/dimension check for raw cell buffers.
pub(crate) fn check_cell_buffer(cells: &[i8], width: usize, height: usize) -> Result<()> {
    if (width == 0 || height == 0) && !cells.is_empty() {
        return Err(DrishtiError::invalid(format!(
            "grid is {}x{} but has {} cells",
            width,
            height,
            cells.len()
        )));
    }
    match width.checked_mul(height) {
        Some(expected) if expected == cells.len() => Ok(()),
        Some(expected) => Err(DrishtiError::invalid(format!(
            "data length {} does not match {}x{} = {}",
            cells.len(),
            width,
            height,
            expected
        ))),
        None => Err(DrishtiError::invalid(format!(
            "grid dimensions {}x{} overflow",
            width, height
        ))),
    }
}
