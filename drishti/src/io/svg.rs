//! SVG export of the display raster.
//!
//! Draws a reduced grid the way a renderer would see it, with the robot and
//! goal markers on top. Useful as a snapshot of what the operator sees.

use std::fmt::{self, Write};
use std::path::Path;

use crate::config::{ColorSection, DrishtiConfig, MarkerSection};
use crate::core::{CellClass, ScreenPoint};
use crate::error::Result;
use crate::grid::ReducedGrid;
use crate::tracker::RenderSink;
use crate::transform::MarkerTarget;

/// [`RenderSink`] that keeps the latest frame and writes it as SVG.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    cell_pixel_size: f32,
    markers: MarkerSection,
    colors: ColorSection,
    title: Option<String>,

    grid: Option<ReducedGrid>,
    robot: Option<MarkerTarget>,
    goal: Option<ScreenPoint>,
}

impl SvgRenderer {
    pub fn new(config: &DrishtiConfig) -> Self {
        Self {
            cell_pixel_size: config.display.cell_pixel_size,
            markers: config.markers,
            colors: config.colors.clone(),
            title: None,
            grid: None,
            robot: None,
            goal: None,
        }
    }

    /// Set a title, written as the SVG `<title>` element
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn grid(&self) -> Option<&ReducedGrid> {
        self.grid.as_ref()
    }

    pub fn robot(&self) -> Option<MarkerTarget> {
        self.robot
    }

    pub fn goal(&self) -> Option<ScreenPoint> {
        self.goal
    }

    /// Render to SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut svg);
        svg
    }

    /// Write the SVG document
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        let cps = self.cell_pixel_size;
        let (width, height) = self
            .grid
            .as_ref()
            .map(|g| g.screen_size(cps))
            .unwrap_or((0.0, 0.0));

        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        if let Some(title) = &self.title {
            writeln!(out, "  <title>{}</title>", escape(title))?;
        }

        if let Some(grid) = &self.grid {
            self.write_grid(out, grid)?;
        }
        if let Some(robot) = self.robot {
            self.write_robot(out, robot)?;
        }
        if let Some(goal) = self.goal {
            writeln!(
                out,
                r#"  <circle id="goal" cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                goal.x,
                goal.y,
                self.markers.goal_radius_cells * cps,
                self.colors.goal
            )?;
        }

        writeln!(out, "</svg>")
    }

    /// Save SVG to file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())?;
        tracing::info!("Wrote {}", path.display());
        Ok(())
    }

    fn write_grid<W: Write>(&self, out: &mut W, grid: &ReducedGrid) -> fmt::Result {
        let cps = self.cell_pixel_size;
        let (width, height) = grid.screen_size(cps);

        writeln!(out, r#"  <g id="grid">"#)?;
        // Unknown is the background; only known cells get a rect
        writeln!(
            out,
            r#"    <rect width="{:.0}" height="{:.0}" fill="{}"/>"#,
            width, height, self.colors.unknown
        )?;

        for (cell, class) in grid.iter() {
            let color = match class {
                CellClass::Unknown => continue,
                CellClass::Free => &self.colors.free,
                CellClass::Occupied => &self.colors.occupied,
            };

            // Row 0 is the bottom pixel row
            let px_x = cell.col as f32 * cps;
            let px_y = (grid.height() as f32 - cell.row as f32 - 1.0) * cps;

            writeln!(
                out,
                r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                px_x, px_y, cps, cps, color
            )?;
        }

        writeln!(out, "  </g>")
    }

    fn write_robot<W: Write>(&self, out: &mut W, robot: MarkerTarget) -> fmt::Result {
        let cps = self.cell_pixel_size;
        let radius = self.markers.robot_radius_cells * cps;
        // Marker targets are cell corners; draw at the cell center
        let cx = robot.position.x + cps * 0.5;
        let cy = robot.position.y + cps * 0.5;

        writeln!(out, r#"  <g id="robot">"#)?;
        writeln!(
            out,
            r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
            cx, cy, radius, self.colors.robot
        )?;
        if let Some(heading) = robot.heading {
            let len = radius * 2.0;
            let dx = len * heading.cos();
            let dy = -len * heading.sin(); // Flip Y for SVG
            writeln!(
                out,
                r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1.5"/>"#,
                cx,
                cy,
                cx + dx,
                cy + dy,
                self.colors.robot
            )?;
        }
        writeln!(out, "  </g>")
    }
}

impl RenderSink for SvgRenderer {
    fn render_map(&mut self, grid: &ReducedGrid) {
        self.grid = Some(grid.clone());
    }

    fn animate_marker(&mut self, target: MarkerTarget) {
        self.robot = Some(target);
    }

    fn show_goal_marker(&mut self, position: Option<ScreenPoint>) {
        self.goal = position;
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::reduce_raw;

    fn renderer() -> SvgRenderer {
        SvgRenderer::new(&DrishtiConfig::default())
    }

    #[test]
    fn test_empty_document() {
        let svg = renderer().render();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="0" height="0""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_grid_flip() {
        // 2x2 reduced: occupied at (col 1, row 0) → bottom-right square
        let grid = reduce_raw(&[0, 100, -1, 0], 2, 2, 1).unwrap();
        let mut r = renderer();
        r.render_map(&grid);
        let svg = r.render();

        assert!(svg.contains(r#"width="8" height="8""#));
        assert!(svg.contains(r#"<rect x="4.0" y="4.0" width="4.0" height="4.0" fill="black"/>"#));
        assert!(svg.contains(r#"<rect x="0.0" y="4.0" width="4.0" height="4.0" fill="white"/>"#));
        assert!(svg.contains(r#"<rect x="4.0" y="0.0" width="4.0" height="4.0" fill="white"/>"#));
        // Unknown cell is left to the background
        assert!(!svg.contains(r#"<rect x="0.0" y="0.0""#));
    }

    #[test]
    fn test_markers() {
        let mut r = renderer().with_title("a < b");
        r.animate_marker(MarkerTarget {
            position: ScreenPoint::new(4.0, 0.0),
            heading: Some(0.0),
        });
        r.show_goal_marker(Some(ScreenPoint::new(1.0, 2.0)));
        let svg = r.render();

        assert!(svg.contains("<title>a &lt; b</title>"));
        assert!(svg.contains(r#"<circle cx="6.0" cy="2.0" r="8.0" fill="red"/>"#));
        assert!(svg.contains(r#"x2="22.0" y2="2.0""#));
        assert!(svg.contains(r#"<circle id="goal" cx="1.0" cy="2.0" r="8.0" fill="blue"/>"#));

        r.show_goal_marker(None);
        assert!(!r.render().contains(r#"id="goal""#));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        let mut r = renderer();
        r.render_map(&reduce_raw(&[0; 16], 4, 4, 2).unwrap());
        r.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, r.render());
    }
}
