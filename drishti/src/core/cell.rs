//! Display classification of occupancy values.
//!
//! Source grids carry probabilistic values in {-1, 0, 1..100}. For display
//! every value collapses into one of three classes:
//!
//! ```text
//!   raw == -1        → Unknown   (-1)
//!   raw ==  0        → Free      ( 0)
//!   raw  >  0        → Occupied  (100)
//! ```

use serde::{Deserialize, Serialize};

/// Raw value marking an unobserved cell.
pub const UNKNOWN_VALUE: i8 = -1;
/// Raw value marking a free cell.
pub const FREE_VALUE: i8 = 0;
/// Aggregated value for an occupied cell.
pub const OCCUPIED_VALUE: i8 = 100;

/// Display class of a cell.
///
/// Variants are declared in aggregation priority order, so `Ord` gives the
/// downsampling tie-break directly: `Occupied > Unknown > Free`. An obstacle
/// anywhere in a block must never be hidden by unknown or free neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CellClass {
    /// Observed and traversable
    #[default]
    Free,
    /// Not yet observed
    Unknown,
    /// Occupancy probability above zero
    Occupied,
}

impl CellClass {
    /// Classify a raw occupancy value.
    ///
    /// Negative values other than -1 never pass grid validation; they are
    /// treated as unknown here.
    #[inline]
    pub fn classify(raw: i8) -> Self {
        if raw > 0 {
            CellClass::Occupied
        } else if raw < 0 {
            CellClass::Unknown
        } else {
            CellClass::Free
        }
    }

    /// Aggregated display value (-1, 0 or 100).
    #[inline]
    pub fn value(self) -> i8 {
        match self {
            CellClass::Free => FREE_VALUE,
            CellClass::Unknown => UNKNOWN_VALUE,
            CellClass::Occupied => OCCUPIED_VALUE,
        }
    }

    /// Higher-priority class of the two.
    #[inline]
    pub fn merge(self, other: CellClass) -> CellClass {
        self.max(other)
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellClass::Free => '.',
            CellClass::Unknown => '?',
            CellClass::Occupied => '#',
        }
    }
}
