//! Collaborator ports injected into the tracker.
//!
//! The tracker never owns a socket or a drawing surface. It talks to:
//!
//! - a [`RenderSink`] that rasterizes grids and animates markers,
//! - a [`CommandTransport`] that delivers goals and operator commands,
//! - a [`TelemetrySource`] that yields map and pose updates.

use std::sync::mpsc::{Receiver, TryRecvError};

use crate::core::{Pose, ScreenPoint};
use crate::error::Result;
use crate::grid::{OccupancyGrid, ReducedGrid};
use crate::teleop::{MappingCommand, TeleopCommand};
use crate::transform::MarkerTarget;

use super::goal::GoalRequest;

/// Rendering collaborator.
///
/// Owns all animation state; the tracker only hands it targets.
///
/// # Example
///
/// ```ignore
/// struct CanvasRenderer { /* drawing surface */ }
///
/// impl RenderSink for CanvasRenderer {
///     fn render_map(&mut self, grid: &ReducedGrid) {
///         self.canvas.draw_cells(grid.cells(), grid.width(), grid.height());
///     }
///
///     fn animate_marker(&mut self, target: MarkerTarget) {
///         self.robot_spring.set_target(target.position.x, target.position.y);
///     }
/// }
/// ```
pub trait RenderSink {
    /// Replace the displayed raster.
    fn render_map(&mut self, grid: &ReducedGrid);

    /// Move the robot marker toward a new target.
    fn animate_marker(&mut self, target: MarkerTarget);

    /// Show or clear (`None`) the goal marker.
    ///
    /// Default implementation does nothing.
    fn show_goal_marker(&mut self, _position: Option<ScreenPoint>) {}
}

/// Command delivery collaborator.
///
/// Implementations own connection handling and retries; errors are reported
/// back through [`DrishtiError::Transport`](crate::error::DrishtiError::Transport).
pub trait CommandTransport {
    /// Deliver a navigation goal in world coordinates.
    fn send_goal(&mut self, goal: GoalRequest) -> Result<()>;

    /// Deliver a directional teleop command.
    fn send_teleop(&mut self, command: TeleopCommand) -> Result<()>;

    /// Start or stop a mapping session.
    fn send_mapping(&mut self, command: MappingCommand) -> Result<()>;
}

/// Updates arriving from the robot side.
#[derive(Clone, Debug, PartialEq)]
pub enum TelemetryEvent {
    /// New map snapshot (replaces the previous one)
    Map(OccupancyGrid),
    /// New robot pose (replaces the previous one)
    Pose(Pose),
    /// The robot reached the last submitted goal
    GoalReached,
}

/// Source of telemetry events.
pub trait TelemetrySource {
    /// Next pending event, or `None` when nothing is waiting.
    ///
    /// Must not block.
    fn next_event(&mut self) -> Option<TelemetryEvent>;
}

/// [`TelemetrySource`] backed by an mpsc channel.
///
/// Lets a network thread push events while the UI thread drains them.
pub struct ChannelSource {
    rx: Receiver<TelemetryEvent>,
    disconnected: bool,
}

impl ChannelSource {
    pub fn new(rx: Receiver<TelemetryEvent>) -> Self {
        Self {
            rx,
            disconnected: false,
        }
    }

    /// True once every sender has been dropped and the queue is empty.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl TelemetrySource for ChannelSource {
    fn next_event(&mut self) -> Option<TelemetryEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    tracing::info!("Telemetry channel closed");
                    self.disconnected = true;
                }
                None
            }
        }
    }
}
