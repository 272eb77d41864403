//! JSON payloads exchanged with the robot side.
//!
//! Wire structs mirror the JSON shapes one-to-one and are converted into the
//! validated crate types with `TryFrom`. Malformed JSON becomes
//! [`DrishtiError::Parse`]; well-formed JSON with bad values becomes
//! [`DrishtiError::InvalidArgument`].
//!
//! Map payloads follow ROS `nav_msgs/OccupancyGrid`:
//!
//! ```json
//! {
//!   "header": { "frame_id": "map" },
//!   "info": {
//!     "resolution": 0.05, "width": 8, "height": 8,
//!     "origin": {
//!       "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
//!       "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
//!     }
//!   },
//!   "data": [-1, 0, 100, ...]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Pose, Quaternion};
use crate::error::{DrishtiError, Result};
use crate::grid::{MapMetadata, OccupancyGrid};
use crate::teleop::TeleopCommand;
use crate::tracker::GoalRequest;

/// `geometry_msgs/Point`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointMsg {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// `geometry_msgs/Quaternion`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuaternionMsg {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default = "unit_w")]
    pub w: f32,
}

fn unit_w() -> f32 {
    1.0
}

impl Default for QuaternionMsg {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

impl From<QuaternionMsg> for Quaternion {
    fn from(q: QuaternionMsg) -> Self {
        Quaternion {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<Quaternion> for QuaternionMsg {
    fn from(q: Quaternion) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

/// `geometry_msgs/Pose` as used for the map origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginMsg {
    pub position: PointMsg,
    #[serde(default)]
    pub orientation: QuaternionMsg,
}

/// `nav_msgs/MapMetaData`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapInfoMsg {
    pub resolution: f32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub origin: OriginMsg,
}

/// `nav_msgs/OccupancyGrid`; the header is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGridMsg {
    pub info: MapInfoMsg,
    /// Kept wider than `i8` so out-of-range values report which cell failed
    pub data: Vec<i16>,
}

impl TryFrom<OccupancyGridMsg> for OccupancyGrid {
    type Error = DrishtiError;

    fn try_from(msg: OccupancyGridMsg) -> Result<Self> {
        let info = msg.info;
        let origin = Pose::from_quaternion(
            info.origin.position.x,
            info.origin.position.y,
            info.origin.orientation.into(),
        );
        let metadata = MapMetadata {
            resolution: info.resolution,
            width: info.width as usize,
            height: info.height as usize,
            origin,
        };

        let cells = msg
            .data
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                i8::try_from(v).map_err(|_| {
                    DrishtiError::invalid(format!("cell {} value {} out of range", i, v))
                })
            })
            .collect::<Result<Vec<i8>>>()?;

        OccupancyGrid::new(metadata, cells)
    }
}

impl From<&OccupancyGrid> for OccupancyGridMsg {
    fn from(grid: &OccupancyGrid) -> Self {
        let origin = grid.origin();
        let orientation = origin
            .heading
            .map(Quaternion::from_yaw)
            .unwrap_or_default();
        Self {
            info: MapInfoMsg {
                resolution: grid.resolution(),
                width: grid.width() as u32,
                height: grid.height() as u32,
                origin: OriginMsg {
                    position: PointMsg {
                        x: origin.position.x,
                        y: origin.position.y,
                        z: 0.0,
                    },
                    orientation: orientation.into(),
                },
            },
            data: grid.cells().iter().map(|&v| v as i16).collect(),
        }
    }
}

/// Orientation of a pose payload: a bare yaw or a quaternion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrientationMsg {
    Yaw(f32),
    Quaternion(QuaternionMsg),
}

/// Robot pose payload: `{ "x", "y", "orientation"? }`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseMsg {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationMsg>,
}

impl TryFrom<PoseMsg> for Pose {
    type Error = DrishtiError;

    fn try_from(msg: PoseMsg) -> Result<Self> {
        let pose = match msg.orientation {
            None => Pose::at(msg.x, msg.y),
            Some(OrientationMsg::Yaw(yaw)) => Pose::with_heading(msg.x, msg.y, yaw),
            Some(OrientationMsg::Quaternion(q)) => {
                let q: Quaternion = q.into();
                if !q.is_finite() {
                    return Err(DrishtiError::invalid("pose orientation must be finite"));
                }
                Pose::from_quaternion(msg.x, msg.y, q)
            }
        };
        if !pose.is_finite() {
            return Err(DrishtiError::invalid(format!(
                "pose must be finite, got ({}, {})",
                msg.x, msg.y
            )));
        }
        Ok(pose)
    }
}

impl From<Pose> for PoseMsg {
    fn from(pose: Pose) -> Self {
        Self {
            x: pose.position.x,
            y: pose.position.y,
            orientation: pose.heading.map(OrientationMsg::Yaw),
        }
    }
}

/// Teleop payload: `{ "command": "F" }`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleopMsg {
    pub command: TeleopCommand,
}

// === Helpers ===

/// Parse and validate an occupancy grid payload.
pub fn parse_grid_json(json: &str) -> Result<OccupancyGrid> {
    let msg: OccupancyGridMsg = serde_json::from_str(json)?;
    msg.try_into()
}

/// Parse and validate a pose payload.
pub fn parse_pose_json(json: &str) -> Result<Pose> {
    let msg: PoseMsg = serde_json::from_str(json)?;
    msg.try_into()
}

/// Parse a tap given as `x,y` screen pixels.
pub fn parse_point_pair(s: &str) -> Result<(f32, f32)> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| DrishtiError::invalid(format!("expected x,y, got {:?}", s)))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| DrishtiError::invalid(format!("bad coordinate {:?}: {}", v, e)))
    };
    Ok((parse(x)?, parse(y)?))
}

pub fn goal_json(goal: &GoalRequest) -> Result<String> {
    Ok(serde_json::to_string(goal)?)
}

pub fn teleop_json(command: TeleopCommand) -> Result<String> {
    Ok(serde_json::to_string(&TeleopMsg { command })?)
}

/// Read a map payload from a JSON file.
pub fn load_grid(path: &Path) -> Result<OccupancyGrid> {
    let json = std::fs::read_to_string(path)?;
    parse_grid_json(&json)
}

/// Read a pose payload from a JSON file.
pub fn load_pose(path: &Path) -> Result<Pose> {
    let json = std::fs::read_to_string(path)?;
    parse_pose_json(&json)
}
