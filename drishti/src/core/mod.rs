//! Core types for the drishti display engine.
//!
//! Three coordinate frames are involved:
//!
//! - **World frame**: map coordinates in world units ([`WorldPoint`]), y up
//! - **Grid frame**: integer cell indices ([`GridCell`]), row 0 at world "south"
//! - **Screen frame**: pixels ([`ScreenPoint`]), origin top-left, y down
//!
//! Plus the display classification of cells ([`CellClass`]) and the robot
//! [`Pose`].

mod cell;
mod point;
mod pose;

pub use cell::{CellClass, FREE_VALUE, OCCUPIED_VALUE, UNKNOWN_VALUE};
pub use point::{GridCell, ScreenPoint, WorldPoint};
pub use pose::{Pose, Quaternion};
