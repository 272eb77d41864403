//! Test utilities for Drishti integration tests.
//!
//! Grid builders and recording ports shared by the scenario tests.

#![allow(dead_code)]

use drishti::{
    CommandTransport, DrishtiError, GoalRequest, MapMetadata, MappingCommand, MarkerTarget,
    OccupancyGrid, ReducedGrid, RenderSink, Result, ScreenPoint, TeleopCommand, WorldPoint,
};

/// Square grid filled with one value.
pub fn uniform_grid(size: usize, resolution: f32, value: i8) -> OccupancyGrid {
    OccupancyGrid::filled(
        MapMetadata::new(resolution, size, size, WorldPoint::ZERO),
        value,
    )
    .unwrap()
}

/// Grid from rows listed top row first, as they would appear on screen.
///
/// `#` occupied, `.` free, `?` unknown.
pub fn grid_from_ascii(rows: &[&str], resolution: f32, origin: WorldPoint) -> OccupancyGrid {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    let mut cells = Vec::with_capacity(width * height);
    for row in rows.iter().rev() {
        cells.extend(row.chars().map(|c| match c {
            '#' => 100,
            '.' => 0,
            _ => -1,
        }));
    }
    OccupancyGrid::new(MapMetadata::new(resolution, width, height, origin), cells).unwrap()
}

/// Renderer that records every call.
#[derive(Default)]
pub struct RecordingRenderer {
    pub maps: Vec<ReducedGrid>,
    pub markers: Vec<MarkerTarget>,
    pub goal_markers: Vec<Option<ScreenPoint>>,
}

impl RenderSink for RecordingRenderer {
    fn render_map(&mut self, grid: &ReducedGrid) {
        self.maps.push(grid.clone());
    }

    fn animate_marker(&mut self, target: MarkerTarget) {
        self.markers.push(target);
    }

    fn show_goal_marker(&mut self, position: Option<ScreenPoint>) {
        self.goal_markers.push(position);
    }
}

/// Renderer relying on the default goal marker handling.
#[derive(Default)]
pub struct MinimalRenderer {
    pub renders: usize,
    pub markers: usize,
}

impl RenderSink for MinimalRenderer {
    fn render_map(&mut self, _grid: &ReducedGrid) {
        self.renders += 1;
    }

    fn animate_marker(&mut self, _target: MarkerTarget) {
        self.markers += 1;
    }
}

/// Transport that records deliveries and can be switched offline.
#[derive(Default)]
pub struct RecordingTransport {
    pub goals: Vec<GoalRequest>,
    pub teleop: Vec<TeleopCommand>,
    pub mapping: Vec<MappingCommand>,
    pub offline: bool,
}

impl RecordingTransport {
    fn link(&self) -> Result<()> {
        if self.offline {
            Err(DrishtiError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl CommandTransport for RecordingTransport {
    fn send_goal(&mut self, goal: GoalRequest) -> Result<()> {
        self.link()?;
        self.goals.push(goal);
        Ok(())
    }

    fn send_teleop(&mut self, command: TeleopCommand) -> Result<()> {
        self.link()?;
        self.teleop.push(command);
        Ok(())
    }

    fn send_mapping(&mut self, command: MappingCommand) -> Result<()> {
        self.link()?;
        self.mapping.push(command);
        Ok(())
    }
}
