//! Display orchestration: map epochs, pose markers and tap-to-goal.
//!
//! The tracker holds the latest map epoch (reduced grid plus the transform
//! derived from the same snapshot) and the latest pose, and turns incoming
//! updates into calls on its injected ports.
//!
//! ```text
//!   TelemetrySource ──► PoseTracker ──► RenderSink
//!                         │    ▲
//!          operator tap ──┘    └──► CommandTransport
//! ```
//!
//! All work is synchronous. Animation state lives in the renderer; the
//! tracker only produces targets.

mod goal;
mod ports;

pub use goal::{GoalMarker, GoalRequest};
pub use ports::{
    ChannelSource, CommandTransport, RenderSink, TelemetryEvent, TelemetrySource,
};

use crate::config::DisplayConfig;
use crate::core::{Pose, ScreenPoint, WorldPoint};
use crate::error::{DrishtiError, Result};
use crate::grid::{OccupancyGrid, ReducedGrid, reduce};
use crate::teleop::{MappingCommand, TeleopCommand};
use crate::transform::{FrameTransform, MarkerTarget};

/// Reduced grid and transform from one snapshot.
///
/// Kept together so a reduced height is never paired with another map's
/// metadata.
#[derive(Clone, Debug)]
struct MapEpoch {
    reduced: ReducedGrid,
    transform: FrameTransform,
}

impl MapEpoch {
    fn height(&self) -> usize {
        self.reduced.height()
    }
}

/// Orchestrates map display, robot marker and goal selection.
pub struct PoseTracker<R: RenderSink, T: CommandTransport> {
    display: DisplayConfig,
    renderer: R,
    transport: T,

    epoch: Option<MapEpoch>,
    pose: Option<Pose>,

    selecting_goal: bool,
    goal_marker: Option<GoalMarker>,
    mapping_active: bool,
}

impl<R: RenderSink, T: CommandTransport> PoseTracker<R, T> {
    /// Create a tracker with no map and no pose.
    pub fn new(display: DisplayConfig, renderer: R, transport: T) -> Self {
        Self {
            display,
            renderer,
            transport,
            epoch: None,
            pose: None,
            selecting_goal: false,
            goal_marker: None,
            mapping_active: false,
        }
    }

    // === Telemetry ===

    /// Replace the map epoch with a new snapshot.
    ///
    /// On failure the previous epoch stays in place. A held pose and goal
    /// marker are re-projected onto the new epoch.
    pub fn on_map_update(&mut self, grid: &OccupancyGrid) -> Result<()> {
        let transform = FrameTransform::from_metadata(grid.metadata(), &self.display)?;
        let reduced = reduce(grid, self.display.downsample_factor)?;

        tracing::debug!(
            "Map update {}x{} -> {}x{}",
            grid.width(),
            grid.height(),
            reduced.width(),
            reduced.height()
        );

        self.renderer.render_map(&reduced);
        self.epoch = Some(MapEpoch { reduced, transform });

        if let Some(pose) = self.pose {
            self.emit_marker(&pose);
        }
        if let Some(marker) = self.goal_marker.as_mut()
            && let Some(epoch) = &self.epoch
        {
            marker.screen = epoch
                .transform
                .world_to_screen_precise(marker.goal.position(), epoch.height());
            self.renderer.show_goal_marker(Some(marker.screen));
        }
        Ok(())
    }

    /// Store a new pose and animate the marker toward it.
    ///
    /// Returns `Ok(None)` while no map has arrived; the pose is still kept
    /// and placed once the first map lands.
    pub fn on_pose_update(&mut self, pose: Pose) -> Result<Option<MarkerTarget>> {
        if !pose.is_finite() {
            return Err(DrishtiError::invalid("pose must be finite"));
        }
        self.pose = Some(pose);
        let target = self.emit_marker(&pose);
        if target.is_none() {
            tracing::debug!("Pose held until first map");
        }
        Ok(target)
    }

    /// Clear the goal marker after the robot reports arrival.
    pub fn on_goal_reached(&mut self) {
        if let Some(marker) = self.goal_marker.take() {
            tracing::info!(
                "Goal reached at ({:.2}, {:.2})",
                marker.goal.x,
                marker.goal.y
            );
            self.renderer.show_goal_marker(None);
        }
    }

    /// Dispatch every pending event from `source` in arrival order.
    ///
    /// Rejected maps and poses are logged and skipped. Returns the number of
    /// events consumed.
    pub fn drain<S: TelemetrySource>(&mut self, source: &mut S) -> usize {
        let mut count = 0;
        while let Some(event) = source.next_event() {
            count += 1;
            match event {
                TelemetryEvent::Map(grid) => {
                    if let Err(e) = self.on_map_update(&grid) {
                        tracing::warn!("Dropped map update: {}", e);
                    }
                }
                TelemetryEvent::Pose(pose) => {
                    if let Err(e) = self.on_pose_update(pose) {
                        tracing::warn!("Dropped pose update: {}", e);
                    }
                }
                TelemetryEvent::GoalReached => self.on_goal_reached(),
            }
        }
        count
    }

    fn emit_marker(&mut self, pose: &Pose) -> Option<MarkerTarget> {
        let epoch = self.epoch.as_ref()?;
        let target = epoch.transform.marker_target(pose, epoch.height());
        self.renderer.animate_marker(target);
        Some(target)
    }

    // === Goal selection ===

    /// Arm goal selection: the next tap becomes a goal.
    pub fn begin_goal_selection(&mut self) {
        self.selecting_goal = true;
    }

    pub fn cancel_goal_selection(&mut self) {
        self.selecting_goal = false;
    }

    /// Flip goal selection, returning the new state.
    pub fn toggle_goal_selection(&mut self) -> bool {
        self.selecting_goal = !self.selecting_goal;
        self.selecting_goal
    }

    pub fn is_selecting_goal(&self) -> bool {
        self.selecting_goal
    }

    /// Handle an operator tap on the map raster.
    ///
    /// Ignored unless goal selection is armed. Before the first map the tap
    /// is a no-op and selection stays armed. Otherwise selection is disarmed
    /// (single shot) and the goal is sent; a transport failure is returned
    /// with selection already disarmed and no goal marker recorded.
    pub fn on_screen_tap(&mut self, screen: ScreenPoint) -> Result<Option<GoalRequest>> {
        if !self.selecting_goal {
            return Ok(None);
        }
        if !screen.is_finite() {
            return Err(DrishtiError::invalid("tap position must be finite"));
        }
        let world = match self.screen_to_world(screen) {
            Ok(world) => world,
            Err(e) if e.is_stale() => {
                tracing::debug!("Tap ignored: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.selecting_goal = false;
        let goal = GoalRequest::new(world);

        if let Err(e) = self.transport.send_goal(goal) {
            tracing::warn!("Failed to send goal: {}", e);
            return Err(e);
        }

        tracing::info!("Goal sent: ({:.2}, {:.2})", goal.x, goal.y);
        self.goal_marker = Some(GoalMarker { screen, goal });
        self.renderer.show_goal_marker(Some(screen));
        Ok(Some(goal))
    }

    // === Operator commands ===

    /// Forward a directional command.
    pub fn send_teleop(&mut self, command: TeleopCommand) -> Result<()> {
        tracing::debug!("Teleop {}", command);
        self.transport.send_teleop(command).inspect_err(|e| {
            tracing::warn!("Failed to send teleop {}: {}", command, e);
        })
    }

    /// Start or stop the mapping session.
    ///
    /// The local session state only flips once the command is delivered.
    pub fn toggle_mapping(&mut self) -> Result<MappingCommand> {
        let command = MappingCommand::toggle_from(self.mapping_active);
        if let Err(e) = self.transport.send_mapping(command) {
            tracing::warn!("Failed to {}: {}", command.action(), e);
            return Err(e);
        }
        self.mapping_active = !self.mapping_active;
        tracing::info!("Mapping {}", if self.mapping_active { "started" } else { "stopped" });
        Ok(command)
    }

    pub fn is_mapping(&self) -> bool {
        self.mapping_active
    }

    // === Accessors ===

    /// World point under a screen point, against the current epoch.
    pub fn screen_to_world(&self, screen: ScreenPoint) -> Result<WorldPoint> {
        let epoch = self
            .epoch
            .as_ref()
            .ok_or(DrishtiError::StaleInput("no map received yet"))?;
        Ok(epoch.transform.screen_to_world(screen, epoch.height()))
    }

    pub fn reduced_grid(&self) -> Option<&ReducedGrid> {
        self.epoch.as_ref().map(|e| &e.reduced)
    }

    pub fn transform(&self) -> Option<&FrameTransform> {
        self.epoch.as_ref().map(|e| &e.transform)
    }

    pub fn latest_pose(&self) -> Option<Pose> {
        self.pose
    }

    pub fn goal_marker(&self) -> Option<GoalMarker> {
        self.goal_marker
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the tracker, returning its ports.
    pub fn into_ports(self) -> (R, T) {
        (self.renderer, self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridCell, WorldPoint};
    use crate::grid::MapMetadata;
    use approx::assert_abs_diff_eq;

    #[derive(Default)]
    struct Renderer {
        maps: Vec<ReducedGrid>,
        markers: Vec<MarkerTarget>,
        goals: Vec<Option<ScreenPoint>>,
    }

    impl RenderSink for Renderer {
        fn render_map(&mut self, grid: &ReducedGrid) {
            self.maps.push(grid.clone());
        }

        fn animate_marker(&mut self, target: MarkerTarget) {
            self.markers.push(target);
        }

        fn show_goal_marker(&mut self, position: Option<ScreenPoint>) {
            self.goals.push(position);
        }
    }

    #[derive(Default)]
    struct Transport {
        goals: Vec<GoalRequest>,
        teleop: Vec<TeleopCommand>,
        mapping: Vec<MappingCommand>,
        fail: bool,
    }

    impl Transport {
        fn check(&self) -> Result<()> {
            if self.fail {
                Err(DrishtiError::Transport("link down".into()))
            } else {
                Ok(())
            }
        }
    }

    impl CommandTransport for Transport {
        fn send_goal(&mut self, goal: GoalRequest) -> Result<()> {
            self.check()?;
            self.goals.push(goal);
            Ok(())
        }

        fn send_teleop(&mut self, command: TeleopCommand) -> Result<()> {
            self.check()?;
            self.teleop.push(command);
            Ok(())
        }

        fn send_mapping(&mut self, command: MappingCommand) -> Result<()> {
            self.check()?;
            self.mapping.push(command);
            Ok(())
        }
    }

    fn tracker() -> PoseTracker<Renderer, Transport> {
        PoseTracker::new(DisplayConfig::default(), Renderer::default(), Transport::default())
    }

    fn map(size: usize) -> OccupancyGrid {
        OccupancyGrid::filled(MapMetadata::new(0.05, size, size, WorldPoint::ZERO), 0).unwrap()
    }

    #[test]
    fn test_map_update_renders() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();

        assert_eq!(t.renderer().maps.len(), 1);
        let reduced = t.reduced_grid().unwrap();
        assert_eq!((reduced.width(), reduced.height()), (2, 2));
        assert_eq!(t.transform().unwrap().factor(), 4);
    }

    #[test]
    fn test_rejected_map_installs_nothing() {
        let display = DisplayConfig {
            downsample_factor: 0,
            ..DisplayConfig::default()
        };
        let mut t = PoseTracker::new(display, Renderer::default(), Transport::default());
        t.on_pose_update(Pose::at(0.1, 0.1)).unwrap();

        let err = t.on_map_update(&map(8)).unwrap_err();
        assert!(matches!(err, DrishtiError::InvalidArgument(_)));
        assert!(t.reduced_grid().is_none());
        assert!(t.renderer().maps.is_empty());
        assert!(t.renderer().markers.is_empty());
    }

    #[test]
    fn test_pose_before_map_is_held() {
        let mut t = tracker();
        let out = t.on_pose_update(Pose::with_heading(0.1, 0.1, 0.5)).unwrap();
        assert_eq!(out, None);
        assert!(t.renderer().markers.is_empty());
        assert_eq!(t.latest_pose(), Some(Pose::with_heading(0.1, 0.1, 0.5)));

        // First map places the held pose
        t.on_map_update(&map(8)).unwrap();
        assert_eq!(t.renderer().markers.len(), 1);
        assert_eq!(t.renderer().markers[0].position, ScreenPoint::new(0.0, 4.0));
        assert_eq!(t.renderer().markers[0].heading, Some(0.5));
    }

    #[test]
    fn test_pose_update_animates() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();

        let target = t.on_pose_update(Pose::at(0.3, 0.3)).unwrap().unwrap();
        assert_eq!(target.position, ScreenPoint::new(4.0, 0.0));
        assert_eq!(t.renderer().markers, vec![target]);
    }

    #[test]
    fn test_non_finite_pose_rejected() {
        let mut t = tracker();
        let err = t.on_pose_update(Pose::at(f32::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, DrishtiError::InvalidArgument(_)));
        assert_eq!(t.latest_pose(), None);
    }

    #[test]
    fn test_tap_ignored_unless_selecting() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();
        assert_eq!(t.on_screen_tap(ScreenPoint::new(4.0, 4.0)).unwrap(), None);
        assert!(t.transport().goals.is_empty());
    }

    #[test]
    fn test_tap_before_map_keeps_selection() {
        let mut t = tracker();
        t.begin_goal_selection();
        assert_eq!(t.on_screen_tap(ScreenPoint::new(4.0, 4.0)).unwrap(), None);
        assert!(t.is_selecting_goal());
        assert!(t.transport().goals.is_empty());
    }

    #[test]
    fn test_tap_sends_goal_once() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();
        t.begin_goal_selection();

        let goal = t.on_screen_tap(ScreenPoint::new(4.0, 4.0)).unwrap().unwrap();
        assert_abs_diff_eq!(goal.x, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(goal.y, 0.2, epsilon = 1e-6);
        assert!(!t.is_selecting_goal());
        assert_eq!(t.transport().goals, vec![goal]);
        assert_eq!(t.goal_marker().unwrap().screen, ScreenPoint::new(4.0, 4.0));
        assert_eq!(t.renderer().goals, vec![Some(ScreenPoint::new(4.0, 4.0))]);

        // Single shot
        assert_eq!(t.on_screen_tap(ScreenPoint::new(1.0, 1.0)).unwrap(), None);
        assert_eq!(t.transport().goals.len(), 1);
    }

    #[test]
    fn test_tap_transport_failure() {
        let mut t = PoseTracker::new(
            DisplayConfig::default(),
            Renderer::default(),
            Transport {
                fail: true,
                ..Default::default()
            },
        );
        t.on_map_update(&map(8)).unwrap();
        t.begin_goal_selection();

        let err = t.on_screen_tap(ScreenPoint::new(4.0, 4.0)).unwrap_err();
        assert!(matches!(err, DrishtiError::Transport(_)));
        assert!(!t.is_selecting_goal());
        assert!(t.goal_marker().is_none());
        assert!(t.reduced_grid().is_some());
    }

    #[test]
    fn test_goal_reached_clears_marker() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();
        t.begin_goal_selection();
        t.on_screen_tap(ScreenPoint::new(4.0, 4.0)).unwrap();

        t.on_goal_reached();
        assert!(t.goal_marker().is_none());
        assert_eq!(t.renderer().goals.last(), Some(&None));

        // Nothing to clear the second time
        let calls = t.renderer().goals.len();
        t.on_goal_reached();
        assert_eq!(t.renderer().goals.len(), calls);
    }

    #[test]
    fn test_goal_marker_follows_new_map() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();
        t.begin_goal_selection();
        t.on_screen_tap(ScreenPoint::new(4.0, 4.0)).unwrap();

        // Taller map: the same world goal moves down the raster
        t.on_map_update(&map(16)).unwrap();
        let marker = t.goal_marker().unwrap();
        assert_abs_diff_eq!(marker.screen.x, 4.0, epsilon = 1e-4);
        assert_abs_diff_eq!(marker.screen.y, 12.0, epsilon = 1e-4);
    }

    #[test]
    fn test_selection_toggle() {
        let mut t = tracker();
        assert!(!t.is_selecting_goal());
        assert!(t.toggle_goal_selection());
        assert!(!t.toggle_goal_selection());
        t.begin_goal_selection();
        t.cancel_goal_selection();
        assert!(!t.is_selecting_goal());
    }

    #[test]
    fn test_screen_to_world_stale() {
        let t = tracker();
        let err = t.screen_to_world(ScreenPoint::new(0.0, 0.0)).unwrap_err();
        assert!(err.is_stale());
    }

    #[test]
    fn test_tap_lands_in_expected_cell() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();
        let tap = ScreenPoint::new(4.0, 4.0);
        let world = t.screen_to_world(tap).unwrap();
        let transform = t.transform().unwrap();
        let h = t.reduced_grid().unwrap().height();

        // The tap pixel belongs to cell (1, 0); its world point is that cell's corner
        let cell = transform.screen_to_reduced_cell(tap, h);
        assert_eq!(cell, GridCell::new(1, 0));
        let center = transform.reduced_cell_center(cell);
        assert!(world.distance(&center) <= transform.reduced_cell_extent());
    }

    #[test]
    fn test_out_of_range_heading_reaches_renderer() {
        let mut t = tracker();
        t.on_map_update(&map(8)).unwrap();
        let target = t.on_pose_update(Pose::with_heading(0.1, 0.1, 4.0)).unwrap();
        assert_eq!(target.map(|m| m.heading), Some(Some(4.0)));
        assert_eq!(t.renderer().markers[0].heading, Some(4.0));
    }

    #[test]
    fn test_teleop_forwarded() {
        let mut t = tracker();
        t.send_teleop(TeleopCommand::Forward).unwrap();
        t.send_teleop(TeleopCommand::Stop).unwrap();
        assert_eq!(
            t.transport().teleop,
            vec![TeleopCommand::Forward, TeleopCommand::Stop]
        );
    }

    #[test]
    fn test_toggle_mapping() {
        let mut t = tracker();
        assert_eq!(t.toggle_mapping().unwrap(), MappingCommand::Start);
        assert!(t.is_mapping());
        assert_eq!(t.toggle_mapping().unwrap(), MappingCommand::Stop);
        assert!(!t.is_mapping());
        assert_eq!(
            t.transport().mapping,
            vec![MappingCommand::Start, MappingCommand::Stop]
        );
    }

    #[test]
    fn test_toggle_mapping_failure_keeps_state() {
        let mut t = PoseTracker::new(
            DisplayConfig::default(),
            Renderer::default(),
            Transport {
                fail: true,
                ..Default::default()
            },
        );
        assert!(t.toggle_mapping().is_err());
        assert!(!t.is_mapping());
    }

    #[test]
    fn test_drain_dispatches_in_order() {
        let mut t = tracker();
        let mut events = vec![
            TelemetryEvent::Pose(Pose::at(0.3, 0.1)),
            TelemetryEvent::Map(map(8)),
            TelemetryEvent::Pose(Pose::at(f32::INFINITY, 0.0)),
            TelemetryEvent::GoalReached,
        ]
        .into_iter();

        struct VecSource<'a>(&'a mut std::vec::IntoIter<TelemetryEvent>);
        impl TelemetrySource for VecSource<'_> {
            fn next_event(&mut self) -> Option<TelemetryEvent> {
                self.0.next()
            }
        }

        let consumed = t.drain(&mut VecSource(&mut events));
        assert_eq!(consumed, 4);
        assert_eq!(t.renderer().maps.len(), 1);
        // Held pose placed by the map; the infinite pose was dropped
        assert_eq!(t.renderer().markers.len(), 1);
        assert_eq!(t.latest_pose(), Some(Pose::at(0.3, 0.1)));
    }
}
