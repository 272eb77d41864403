//! Occupancy grid snapshots and display downsampling.
//!
//! ## Data Flow
//!
//! ```text
//! map source ──► OccupancyGrid (validated, immutable)
//!                     │
//!                     ▼  reduce(grid, factor)
//!                ReducedGrid  (ceil(w/f) × ceil(h/f), values -1/0/100)
//!                     │
//!                     ▼
//!                 renderer
//! ```
//!
//! ## Key Components
//!
//! - [`OccupancyGrid`]: full-resolution snapshot with [`MapMetadata`]
//! - [`reduce`] / [`reduce_raw`]: block aggregation (occupied > unknown > free)
//! - [`ReducedGrid`]: the display raster, recomputed on every map update

mod occupancy;
mod reduce;
mod reduced;

pub use occupancy::{MapMetadata, OccupancyGrid};
pub use reduce::{reduce, reduce_raw};
pub use reduced::{CellCounts, ReducedGrid};
