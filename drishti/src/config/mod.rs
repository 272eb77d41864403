//! Configuration loading for Drishti.
//!
//! Loads all settings from a single YAML file; every section and field is
//! optional and falls back to the defaults below.
//!
//! ```yaml
//! display:
//!   cell_pixel_size: 4.0
//!   downsample_factor: 4
//! markers:
//!   robot_radius_cells: 2.0
//! colors:
//!   occupied: "#333333"
//! ```

mod defaults;
mod display;

pub use display::{ColorSection, DisplayConfig, MarkerSection};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DrishtiError, Result};

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/drishti.yaml";

/// Full Drishti configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrishtiConfig {
    /// Raster density
    #[serde(default)]
    pub display: DisplayConfig,

    /// Marker sizes
    #[serde(default)]
    pub markers: MarkerSection,

    /// Raster colors
    #[serde(default)]
    pub colors: ColorSection,
}

impl DrishtiConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DrishtiError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    /// Load from [`DEFAULT_CONFIG_PATH`], or defaults if the file is absent
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            tracing::info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            Self::load(path)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Parse and validate from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DrishtiConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the transforms cannot use.
    pub fn validate(&self) -> Result<()> {
        let cps = self.display.cell_pixel_size;
        if !(cps.is_finite() && cps > 0.0) {
            return Err(DrishtiError::Config(format!(
                "display.cell_pixel_size must be positive, got {}",
                cps
            )));
        }
        if self.display.downsample_factor == 0 {
            return Err(DrishtiError::Config(
                "display.downsample_factor must be >= 1".to_string(),
            ));
        }
        for (name, radius) in [
            ("robot_radius_cells", self.markers.robot_radius_cells),
            ("goal_radius_cells", self.markers.goal_radius_cells),
        ] {
            if !(radius.is_finite() && radius >= 0.0) {
                return Err(DrishtiError::Config(format!(
                    "markers.{} must be non-negative, got {}",
                    name, radius
                )));
            }
        }
        Ok(())
    }
}
