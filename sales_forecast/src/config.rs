//! Forecast policy configuration

use crate::error::{ForecastError, Result};
use crate::series::GapPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default forecast horizon in months
pub const DEFAULT_PERIODS: usize = 6;

/// Longest forecast horizon accepted, in months (100 years)
pub const MAX_PERIODS: usize = 1200;

fn default_periods() -> usize {
    DEFAULT_PERIODS
}

/// Settings that control how the trend forecaster runs
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// periods = 12
/// gap_policy = "fill-zero"
/// floor_at_zero = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastConfig {
    /// Number of months to project past the last observed month
    #[serde(default = "default_periods")]
    pub periods: usize,
    /// Treatment of months with no sales
    #[serde(default)]
    pub gap_policy: GapPolicy,
    /// Clamp projected revenue at zero
    #[serde(default)]
    pub floor_at_zero: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS,
            gap_policy: GapPolicy::default(),
            floor_at_zero: false,
        }
    }
}

impl ForecastConfig {
    /// Default policy with a different horizon
    pub fn with_periods(periods: usize) -> Self {
        Self {
            periods,
            ..Self::default()
        }
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ForecastConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config from a TOML file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that the settings can drive a forecast
    pub fn validate(&self) -> Result<()> {
        validate_periods(self.periods)
    }
}

/// Check that a forecast horizon lies in `1..=MAX_PERIODS`
pub fn validate_periods(periods: usize) -> Result<()> {
    if !(1..=MAX_PERIODS).contains(&periods) {
        return Err(ForecastError::InvalidArgument(format!(
            "periods must be between 1 and {}, got {}",
            MAX_PERIODS, periods
        )));
    }
    Ok(())
}
