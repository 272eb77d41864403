//! Point and cell types for the three display frames.

use serde::{Deserialize, Serialize};

/// Grid cell indices into either the full or the reduced grid.
///
/// Rows follow the map convention: row 0 is the world-frame "south" edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    /// Column index
    pub col: i32,
    /// Row index (increasing with world y)
    pub row: i32,
}

impl GridCell {
    /// Create a new grid cell
    #[inline]
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Row-major index into a grid of the given width, if the cell lies inside.
    #[inline]
    pub fn index_in(&self, width: usize, height: usize) -> Option<usize> {
        if self.col < 0 || self.row < 0 {
            return None;
        }
        let (col, row) = (self.col as usize, self.row as usize);
        (col < width && row < height).then_some(row * width + col)
    }
}

/// World coordinates in the map frame (world units, usually meters)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Screen coordinates in pixels.
///
/// Origin at the top-left corner of the reduced raster, y increasing downward.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal pixel offset
    pub x: f32,
    /// Vertical pixel offset (downward)
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
