//! Display and marker configuration sections.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Raster density settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Pixels per reduced cell
    #[serde(default = "defaults::cell_pixel_size")]
    pub cell_pixel_size: f32,

    /// Source cells per reduced cell along each axis (>= 1)
    #[serde(default = "defaults::downsample_factor")]
    pub downsample_factor: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_pixel_size: defaults::cell_pixel_size(),
            downsample_factor: defaults::downsample_factor(),
        }
    }
}

/// Marker sizes, in reduced cells
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSection {
    /// Robot marker radius
    #[serde(default = "defaults::marker_radius_cells")]
    pub robot_radius_cells: f32,

    /// Goal marker radius
    #[serde(default = "defaults::marker_radius_cells")]
    pub goal_radius_cells: f32,
}

impl Default for MarkerSection {
    fn default() -> Self {
        Self {
            robot_radius_cells: defaults::marker_radius_cells(),
            goal_radius_cells: defaults::marker_radius_cells(),
        }
    }
}

/// Raster colors (any SVG color string)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSection {
    #[serde(default = "defaults::free_color")]
    pub free: String,

    #[serde(default = "defaults::unknown_color")]
    pub unknown: String,

    #[serde(default = "defaults::occupied_color")]
    pub occupied: String,

    #[serde(default = "defaults::robot_color")]
    pub robot: String,

    #[serde(default = "defaults::goal_color")]
    pub goal: String,
}

impl Default for ColorSection {
    fn default() -> Self {
        Self {
            free: defaults::free_color(),
            unknown: defaults::unknown_color(),
            occupied: defaults::occupied_color(),
            robot: defaults::robot_color(),
            goal: defaults::goal_color(),
        }
    }
}
