//! # Drishti
//!
//! Occupancy-grid display core for a robot teleoperation front-end.
//!
//! ## Overview
//!
//! Drishti turns a live occupancy grid and robot pose into something a
//! screen can draw, and turns operator taps back into world-frame goals:
//!
//! - **Downsampling**: full-resolution grids collapse into a coarser display
//!   raster, where occupied beats unknown beats free
//! - **Frame transforms**: world, grid, reduced grid and screen, both ways
//! - **Tracking**: map epochs, robot marker targets, single-shot goal
//!   selection and operator commands through injected ports
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::{DisplayConfig, PoseTracker, ScreenPoint};
//!
//! let mut tracker = PoseTracker::new(DisplayConfig::default(), renderer, transport);
//! tracker.on_map_update(&grid)?;
//! tracker.on_pose_update(pose)?;
//!
//! tracker.begin_goal_selection();
//! if let Some(goal) = tracker.on_screen_tap(ScreenPoint::new(120.0, 48.0))? {
//!     println!("goal at ({:.2}, {:.2})", goal.x, goal.y);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! - World: ROS REP-103, y up, origin at the corner of grid cell (0, 0)
//! - Screen: pixels, origin top-left, y down
//! - Reduced row 0 is the bottom pixel row of the raster

// Core types
pub mod core;

// Snapshots and downsampling
pub mod grid;

// Pure frame conversions
pub mod transform;

// Orchestration and ports
pub mod tracker;

// Operator commands
pub mod teleop;

// Wire payloads and SVG export
pub mod io;

pub mod config;
pub mod error;

// Re-export commonly used types
pub use core::{CellClass, GridCell, Pose, Quaternion, ScreenPoint, WorldPoint};

pub use grid::{CellCounts, MapMetadata, OccupancyGrid, ReducedGrid, reduce, reduce_raw};

pub use transform::{FrameTransform, MarkerTarget};

pub use tracker::{
    ChannelSource, CommandTransport, GoalMarker, GoalRequest, PoseTracker, RenderSink,
    TelemetryEvent, TelemetrySource,
};

pub use teleop::{MappingCommand, TeleopCommand};

pub use config::{DisplayConfig, DrishtiConfig};
pub use error::{DrishtiError, Result};
