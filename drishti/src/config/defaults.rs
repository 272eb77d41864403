//! Default value functions for serde deserialization.

pub fn cell_pixel_size() -> f32 {
    4.0
}

pub fn downsample_factor() -> u32 {
    4
}

pub fn marker_radius_cells() -> f32 {
    2.0
}

pub fn free_color() -> String {
    "white".to_string()
}

pub fn unknown_color() -> String {
    "gray".to_string()
}

pub fn occupied_color() -> String {
    "black".to_string()
}

pub fn robot_color() -> String {
    "red".to_string()
}

pub fn goal_color() -> String {
    "blue".to_string()
}
