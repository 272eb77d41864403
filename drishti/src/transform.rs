//! Conversions between world, grid and screen frames.
//!
//! ## Frames
//!
//! ```text
//!   World (map frame)          Reduced grid              Screen
//!   y ▲                        row ▲                     (0,0) ──► x
//!     │                            │                       │
//!     │      · p                   │   [c,r]               │   ▭ (c·s, (h-r-1)·s)
//!     └──────► x                   └──────► col            ▼ y
//!   origin = cell (0,0) corner
//! ```
//!
//! Grid rows increase with world y, screen rows increase downward, so the
//! vertical axis flips between the grid and the screen: reduced row 0 renders
//! as the bottom pixel row of the raster.
//!
//! Every function here is pure. A [`FrameTransform`] is built from one map's
//! metadata plus the display settings and is only meaningful together with
//! the [`ReducedGrid`](crate::grid::ReducedGrid) height of the same map.

use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::core::{GridCell, Pose, ScreenPoint, WorldPoint};
use crate::error::{DrishtiError, Result};
use crate::grid::MapMetadata;

/// Screen-space animation target for a pose marker.
///
/// The heading is passed through unconverted; interpolation and timing
/// belong to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerTarget {
    pub position: ScreenPoint,
    pub heading: Option<f32>,
}

/// Parameterized world/grid/screen mapping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameTransform {
    resolution: f32,
    origin: WorldPoint,
    factor: u32,
    cell_pixel_size: f32,
}

impl FrameTransform {
    /// Create a transform.
    ///
    /// Fails with [`DrishtiError::InvalidArgument`] if `resolution <= 0`,
    /// `factor == 0`, `cell_pixel_size <= 0`, or any value is not finite.
    pub fn new(
        resolution: f32,
        origin: WorldPoint,
        factor: u32,
        cell_pixel_size: f32,
    ) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(DrishtiError::invalid(format!(
                "resolution must be positive, got {}",
                resolution
            )));
        }
        if factor == 0 {
            return Err(DrishtiError::invalid("downsample factor must be >= 1"));
        }
        if !(cell_pixel_size.is_finite() && cell_pixel_size > 0.0) {
            return Err(DrishtiError::invalid(format!(
                "cell pixel size must be positive, got {}",
                cell_pixel_size
            )));
        }
        if !origin.is_finite() {
            return Err(DrishtiError::invalid("origin must be finite"));
        }

        Ok(Self {
            resolution,
            origin,
            factor,
            cell_pixel_size,
        })
    }

    /// Transform for a map's metadata under the given display settings.
    pub fn from_metadata(metadata: &MapMetadata, display: &DisplayConfig) -> Result<Self> {
        Self::new(
            metadata.resolution,
            metadata.origin.position,
            display.downsample_factor,
            display.cell_pixel_size,
        )
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn cell_pixel_size(&self) -> f32 {
        self.cell_pixel_size
    }

    /// World extent of one reduced cell (`factor * resolution`).
    ///
    /// This is also the round-trip quantization bound per axis.
    #[inline]
    pub fn reduced_cell_extent(&self) -> f32 {
        self.factor as f32 * self.resolution
    }

    // === Forward: world → grid → screen ===

    /// Full-resolution grid cell containing a world point.
    #[inline]
    pub fn world_to_cell(&self, point: WorldPoint) -> GridCell {
        GridCell::new(
            ((point.x - self.origin.x) / self.resolution).floor() as i32,
            ((point.y - self.origin.y) / self.resolution).floor() as i32,
        )
    }

    /// Reduced grid cell containing a world point.
    #[inline]
    pub fn world_to_reduced_cell(&self, point: WorldPoint) -> GridCell {
        let f = self.factor as f32;
        GridCell::new(
            ((point.x - self.origin.x) / self.resolution / f).floor() as i32,
            ((point.y - self.origin.y) / self.resolution / f).floor() as i32,
        )
    }

    /// Top-left pixel of a reduced cell on screen.
    #[inline]
    pub fn reduced_cell_to_screen(&self, cell: GridCell, reduced_height: usize) -> ScreenPoint {
        let flipped_row = reduced_height as f32 - cell.row as f32 - 1.0;
        ScreenPoint::new(
            cell.col as f32 * self.cell_pixel_size,
            flipped_row * self.cell_pixel_size,
        )
    }

    /// Screen position of a world point, quantized to its reduced cell.
    #[inline]
    pub fn world_to_screen(&self, point: WorldPoint, reduced_height: usize) -> ScreenPoint {
        self.reduced_cell_to_screen(self.world_to_reduced_cell(point), reduced_height)
    }

    /// Unquantized screen position of a world point.
    ///
    /// Keeps the sub-cell offset so a marker can move smoothly between cells.
    /// [`screen_to_world`](Self::screen_to_world) inverts this exactly.
    #[inline]
    pub fn world_to_screen_precise(&self, point: WorldPoint, reduced_height: usize) -> ScreenPoint {
        let f = self.factor as f32;
        let reduced_x = (point.x - self.origin.x) / self.resolution / f;
        let reduced_y = (point.y - self.origin.y) / self.resolution / f;
        ScreenPoint::new(
            reduced_x * self.cell_pixel_size,
            (reduced_height as f32 - reduced_y) * self.cell_pixel_size,
        )
    }

    /// Animation target for a pose: quantized position plus heading.
    #[inline]
    pub fn marker_target(&self, pose: &Pose, reduced_height: usize) -> MarkerTarget {
        MarkerTarget {
            position: self.world_to_screen(pose.position, reduced_height),
            heading: pose.heading,
        }
    }

    // === Inverse: screen → grid → world ===

    /// Reduced cell whose pixel square contains a screen point.
    #[inline]
    pub fn screen_to_reduced_cell(&self, point: ScreenPoint, reduced_height: usize) -> GridCell {
        let col = (point.x / self.cell_pixel_size).floor() as i32;
        let screen_row = (point.y / self.cell_pixel_size).floor() as i32;
        GridCell::new(col, reduced_height as i32 - 1 - screen_row)
    }

    /// World point for a screen point.
    ///
    /// Inverse of the compound forward path. For quantized positions from
    /// [`world_to_screen`](Self::world_to_screen) the result lies within
    /// [`reduced_cell_extent`](Self::reduced_cell_extent) of the input point.
    #[inline]
    pub fn screen_to_world(&self, point: ScreenPoint, reduced_height: usize) -> WorldPoint {
        let scale = self.factor as f32 * self.resolution;
        let raster_height = reduced_height as f32 * self.cell_pixel_size;
        WorldPoint::new(
            (point.x / self.cell_pixel_size) * scale + self.origin.x,
            ((raster_height - point.y) / self.cell_pixel_size) * scale + self.origin.y,
        )
    }

    /// World center of a reduced cell.
    #[inline]
    pub fn reduced_cell_center(&self, cell: GridCell) -> WorldPoint {
        let extent = self.reduced_cell_extent();
        WorldPoint::new(
            self.origin.x + (cell.col as f32 + 0.5) * extent,
            self.origin.y + (cell.row as f32 + 0.5) * extent,
        )
    }
}
