//! Drishti command-line front-end.
//!
//! Runs the display pipeline over JSON payloads on disk:
//!
//! ```text
//! drishti render --map map.json --pose pose.json --output map.svg
//! drishti goal --map map.json --tap 120,48
//! drishti teleop F
//! ```
//!
//! Outgoing payloads (goals, teleop commands) are printed to stdout as the
//! JSON a control service would receive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use drishti::io::{SvgRenderer, goal_json, load_grid, load_pose, parse_point_pair, teleop_json};
use drishti::{
    CommandTransport, DrishtiConfig, GoalRequest, MappingCommand, PoseTracker, Result,
    ScreenPoint, TeleopCommand,
};

/// Occupancy-grid display tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to configs/drishti.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reduce a map, place the robot and write the raster as SVG
    Render {
        /// OccupancyGrid JSON
        #[arg(short, long)]
        map: PathBuf,

        /// Pose JSON
        #[arg(short, long)]
        pose: Option<PathBuf>,

        /// Output SVG path
        #[arg(short, long, default_value = "map.svg")]
        output: PathBuf,
    },

    /// Convert a screen tap into a navigation goal
    Goal {
        /// OccupancyGrid JSON
        #[arg(short, long)]
        map: PathBuf,

        /// Tap position in pixels, as x,y
        #[arg(short, long)]
        tap: String,
    },

    /// Print the payload for a teleop command (F, B, L, R, S)
    Teleop { command: TeleopCommand },
}

/// Transport that prints each payload instead of sending it.
struct StdoutTransport;

impl CommandTransport for StdoutTransport {
    fn send_goal(&mut self, goal: GoalRequest) -> Result<()> {
        println!("{}", goal_json(&goal)?);
        Ok(())
    }

    fn send_teleop(&mut self, command: TeleopCommand) -> Result<()> {
        println!("{}", teleop_json(command)?);
        Ok(())
    }

    fn send_mapping(&mut self, command: MappingCommand) -> Result<()> {
        println!("/{}", command.action());
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("drishti=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            DrishtiConfig::load(path)?
        }
        None => DrishtiConfig::load_default()?,
    };

    let renderer = SvgRenderer::new(&config);
    let mut tracker = PoseTracker::new(config.display, renderer, StdoutTransport);

    match args.command {
        Command::Render { map, pose, output } => {
            let grid = load_grid(&map)?;
            tracker.on_map_update(&grid)?;
            if let Some(path) = pose {
                tracker.on_pose_update(load_pose(&path)?)?;
            }

            if let Some(reduced) = tracker.reduced_grid() {
                let counts = reduced.counts();
                info!(
                    "Raster {}x{}: {} free, {} occupied, {} unknown",
                    reduced.width(),
                    reduced.height(),
                    counts.free,
                    counts.occupied,
                    counts.unknown
                );
            }
            tracker.renderer().save(&output)?;
        }

        Command::Goal { map, tap } => {
            let grid = load_grid(&map)?;
            tracker.on_map_update(&grid)?;

            let (x, y) = parse_point_pair(&tap)?;
            let screen = ScreenPoint::new(x, y);
            tracker.begin_goal_selection();
            match tracker.on_screen_tap(screen)? {
                Some(goal) => {
                    if let (Some(transform), Some(reduced)) =
                        (tracker.transform(), tracker.reduced_grid())
                    {
                        let cell = transform.screen_to_reduced_cell(screen, reduced.height());
                        info!(
                            "Tap ({}, {}) -> reduced cell ({}, {}) -> world ({:.3}, {:.3})",
                            x, y, cell.col, cell.row, goal.x, goal.y
                        );
                    }
                }
                None => warn!("Tap produced no goal"),
            }
        }

        Command::Teleop { command } => {
            tracker.send_teleop(command)?;
        }
    }

    Ok(())
}
