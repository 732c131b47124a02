//! Forecasting models for monthly revenue series

use crate::error::{ForecastError, Result};
use crate::series::{MonthlySeries, YearMonth};
use serde::Serialize;
use std::fmt::Debug;

/// Forecast result containing projected monthly revenue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Projected values, one per future month
    pub(crate) values: Vec<f64>,
    /// Month each projected value belongs to
    pub(crate) months: Vec<YearMonth>,
    /// Change per month of the fitted line
    pub(crate) slope: f64,
    /// Value of the fitted line at the first observed month
    pub(crate) intercept: f64,
    /// Goodness of fit; absent when the history is flat
    pub(crate) r_squared: Option<f64>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(
        values: Vec<f64>,
        months: Vec<YearMonth>,
        slope: f64,
        intercept: f64,
        r_squared: Option<f64>,
    ) -> Result<Self> {
        if values.len() != months.len() {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match months length ({})",
                values.len(),
                months.len()
            )));
        }

        Ok(Self {
            values,
            months,
            slope,
            intercept,
            r_squared,
        })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the result, keeping only the values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Get the month labels of the forecast
    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.values.len()
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Serialize the forecast as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ForecastError::DataError(format!("cannot serialize forecast: {}", e)))
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// In-sample values for the training months
    fn fitted(&self) -> Vec<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a monthly series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a monthly series
    fn train(&self, series: &MonthlySeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod linear_trend;
