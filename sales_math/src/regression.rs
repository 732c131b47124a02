//! Ordinary least-squares line fitting over an index series
//!
//! The observations are paired with their position `0..n-1`, so the fit is
//! the closed-form solution of `y = intercept + slope * x` with no solver.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Denominators below this are treated as zero
const EPSILON: f64 = 1e-10;

/// A fitted least-squares line over evenly indexed observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
    observations: Vec<f64>,
}

impl LinearRegression {
    /// Fit a line to `values`, using each value's position as its x coordinate
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Need at least 2 points for linear regression, got {}",
                values.len()
            )));
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Value at index {} is not finite",
                pos
            )));
        }

        let n = values.len() as f64;

        // Calculate means
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        if denominator.abs() < EPSILON {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(MathError::CalculationError(
                "Regression parameters overflowed".to_string(),
            ));
        }

        Ok(Self {
            slope,
            intercept,
            observations: values.to_vec(),
        })
    }

    /// Get the fitted slope (change per index step)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the fitted intercept (value at index 0)
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of observations the line was fitted on
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the fit holds no observations (never true for a fitted line)
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Evaluate the line at index `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// In-sample values of the line at `0..n-1`
    pub fn fitted(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.predict(i as f64)).collect()
    }

    /// Evaluate the line at `n, n+1, ..., n+periods-1`
    pub fn extrapolate(&self, periods: usize) -> Result<Vec<f64>> {
        let start = self.len();
        let end = start.checked_add(periods).ok_or_else(|| {
            MathError::InvalidInput(format!(
                "Horizon of {} periods overflows the index range",
                periods
            ))
        })?;

        Ok((start..end).map(|i| self.predict(i as f64)).collect())
    }

    /// Get the R-squared value (coefficient of determination)
    pub fn r_squared(&self) -> Result<f64> {
        let y_mean = self.observations.iter().sum::<f64>() / self.len() as f64;

        let mut ss_total = 0.0; // total sum of squares
        let mut ss_residual = 0.0; // residual sum of squares

        for (i, &y) in self.observations.iter().enumerate() {
            let y_pred = self.predict(i as f64);
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - y_pred).powi(2);
        }

        if ss_total.abs() < EPSILON {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - (ss_residual / ss_total))
    }
}
