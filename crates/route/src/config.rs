//! Optimizer configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all) is a
//! valid configuration.

use crate::error::{Result, RouteError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunables for matrix construction, tour planning and spatial queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Shops further apart than this are not directly connected
    #[serde(default = "default_max_connection_km")]
    pub max_connection_km: f64,

    /// Assumed urban travel speed for tour time estimates
    #[serde(default = "default_average_speed_kmh")]
    pub average_speed_kmh: f64,

    /// Run a 2-opt pass after nearest-neighbour tour construction
    #[serde(default)]
    pub two_opt: bool,

    /// Vertices of the circle returned by radius queries
    #[serde(default = "default_circle_segments")]
    pub circle_segments: usize,

    /// Arc vertices per quarter turn on route corridor caps and joins
    #[serde(default = "default_buffer_segments")]
    pub buffer_segments: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_connection_km: default_max_connection_km(),
            average_speed_kmh: default_average_speed_kmh(),
            two_opt: false,
            circle_segments: default_circle_segments(),
            buffer_segments: default_buffer_segments(),
        }
    }
}

fn default_max_connection_km() -> f64 {
    50.0
}

fn default_average_speed_kmh() -> f64 {
    27.5
}

fn default_circle_segments() -> usize {
    64
}

fn default_buffer_segments() -> usize {
    8
}

impl OptimizerConfig {
    /// Load configuration from a file path, a standard location, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let config = match config_path {
            Some(p) => load_config_file(&p)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| RouteError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make distances or estimates meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_connection_km.is_finite() && self.max_connection_km > 0.0) {
            return Err(RouteError::InvalidConfig(format!(
                "max_connection_km must be a positive number, got {}",
                self.max_connection_km
            )));
        }
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(RouteError::InvalidConfig(format!(
                "average_speed_kmh must be a positive number, got {}",
                self.average_speed_kmh
            )));
        }
        if self.circle_segments < 3 {
            return Err(RouteError::InvalidConfig(format!(
                "circle_segments must be at least 3, got {}",
                self.circle_segments
            )));
        }
        if self.buffer_segments < 1 {
            return Err(RouteError::InvalidConfig(
                "buffer_segments must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["shopmap.toml", ".shopmap.toml", ".config/shopmap.toml"];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<OptimizerConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RouteError::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        RouteError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}
