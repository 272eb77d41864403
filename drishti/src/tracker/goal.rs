//! Navigation goals produced from operator taps.

use serde::{Deserialize, Serialize};

use crate::core::{ScreenPoint, WorldPoint};

/// A world-frame navigation goal from a single tap.
///
/// Serializes as `{"x": .., "y": ..}`, the shape the goal endpoint expects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRequest {
    pub x: f32,
    pub y: f32,
}

impl GoalRequest {
    pub fn new(position: WorldPoint) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }

    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

/// The last submitted goal, kept until the robot reports reaching it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoalMarker {
    /// Where the operator tapped
    pub screen: ScreenPoint,
    /// The goal that was sent
    pub goal: GoalRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_json_shape() {
        let goal = GoalRequest::new(WorldPoint::new(1.5, -0.25));
        let json = serde_json::to_string(&goal).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-0.25}"#);
        assert_eq!(goal.position(), WorldPoint::new(1.5, -0.25));
    }
}
