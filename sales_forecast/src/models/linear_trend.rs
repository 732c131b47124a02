//! Linear trend model: least-squares line over the month index

use crate::config::validate_periods;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::{MonthlySeries, YearMonth};
use sales_math::regression::LinearRegression;
use tracing::debug;

/// Fewest distinct months that define a slope
pub const MIN_MONTHS: usize = 2;

/// Linear trend model
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
    /// Clamp projections at zero
    floor_at_zero: bool,
}

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Name of the model
    name: String,
    /// Fitted line over the training months
    regression: LinearRegression,
    /// Last month seen in training
    last_month: YearMonth,
    /// Clamp projections at zero
    floor_at_zero: bool,
}

impl LinearTrend {
    /// Create a linear trend model that projects the raw fitted line
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
            floor_at_zero: false,
        }
    }

    /// Clamp projected revenue at zero
    pub fn with_floor_at_zero(mut self, floor_at_zero: bool) -> Self {
        self.floor_at_zero = floor_at_zero;
        if floor_at_zero {
            self.name = "Linear Trend (floored)".to_string();
        }
        self
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, series: &MonthlySeries) -> Result<Self::Trained> {
        let last_month = match series.last_month() {
            Some(month) if series.len() >= MIN_MONTHS => month,
            _ => {
                return Err(ForecastError::InsufficientData {
                    needed: MIN_MONTHS,
                    got: series.len(),
                })
            }
        };

        if let Some(point) = series.iter().find(|p| !p.revenue.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Revenue total for {} is not finite",
                point.month
            )));
        }

        let regression = LinearRegression::fit(&series.totals())?;
        debug!(
            months = series.len(),
            slope = regression.slope(),
            intercept = regression.intercept(),
            "fitted linear trend"
        );

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            regression,
            last_month,
            floor_at_zero: self.floor_at_zero,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearTrend {
    pub fn slope(&self) -> f64 {
        self.regression.slope()
    }

    pub fn intercept(&self) -> f64 {
        self.regression.intercept()
    }

    /// Coefficient of determination; `None` for a flat history
    pub fn r_squared(&self) -> Option<f64> {
        self.regression.r_squared().ok()
    }

    pub fn last_month(&self) -> YearMonth {
        self.last_month
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        validate_periods(horizon)?;

        let mut values = self.regression.extrapolate(horizon)?;
        if self.floor_at_zero {
            values.iter_mut().for_each(|v| *v = v.max(0.0));
        }

        ForecastResult::new(
            values,
            self.last_month.following(horizon),
            self.slope(),
            self.intercept(),
            self.r_squared(),
        )
    }

    fn fitted(&self) -> Vec<f64> {
        self.regression.fitted()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
