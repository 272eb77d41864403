//! Edges of the crate: wire payloads and raster export.
//!
//! - **JSON messages**: map, pose, goal and teleop payloads, validated into
//!   crate types on the way in
//! - **SVG export**: a [`RenderSink`](crate::tracker::RenderSink) that writes
//!   the current frame to a file
//!
//! ```rust,ignore
//! use drishti::io::{SvgRenderer, load_grid};
//! use drishti::{DrishtiConfig, PoseTracker};
//!
//! let config = DrishtiConfig::load_default()?;
//! let mut tracker = PoseTracker::new(config.display, SvgRenderer::new(&config), transport);
//! tracker.on_map_update(&load_grid(Path::new("map.json"))?)?;
//! tracker.renderer().save(Path::new("map.svg"))?;
//! ```

pub mod message;
pub mod svg;

pub use message::{
    OccupancyGridMsg, OrientationMsg, PoseMsg, TeleopMsg, goal_json, load_grid, load_pose,
    parse_grid_json, parse_point_pair, parse_pose_json, teleop_json,
};
pub use svg::SvgRenderer;
