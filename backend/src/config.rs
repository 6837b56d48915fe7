//! Calendar configuration.
//!
//! Tunables for paging and bar geometry, stored as YAML. Every field has a
//! default so a partial (or missing) file is valid.

use log::debug;
use serde::{Deserialize, Serialize};
use shared::BarColorKey;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::domain::paging::PagingSettings;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Fraction of the page width a drag must pass to change month
    pub commit_threshold_fraction: f64,
    pub animation_duration_ms: u64,
    pub bar_height: f64,
    /// Space between the top of a week row and lane 0 (room for the day number)
    pub bar_top_inset: f64,
    pub lane_spacing: f64,
    /// Used when an evaluation has no (or an unknown) bar color
    pub default_color_key: BarColorKey,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            commit_threshold_fraction: 0.25,
            animation_duration_ms: 250,
            bar_height: 14.0,
            bar_top_inset: 16.0,
            lane_spacing: 2.0,
            default_color_key: BarColorKey::Beige,
        }
    }
}

impl CalendarConfig {
    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml_content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml_content)?;
        debug!("Loaded calendar config from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self, ConfigError> {
        let config: CalendarConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.commit_threshold_fraction > 0.0 && self.commit_threshold_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "commit_threshold_fraction must be in (0, 1], got {}",
                self.commit_threshold_fraction
            )));
        }
        if !(self.bar_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bar_height must be positive, got {}",
                self.bar_height
            )));
        }
        if !(self.bar_top_inset >= 0.0 && self.lane_spacing >= 0.0) {
            return Err(ConfigError::Invalid(
                "bar_top_inset and lane_spacing must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn paging_settings(&self) -> PagingSettings {
        PagingSettings {
            commit_threshold_fraction: self.commit_threshold_fraction,
            animation_duration: Duration::from_millis(self.animation_duration_ms),
        }
    }
}
