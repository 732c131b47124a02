//! Trend forecaster: monthly aggregation followed by a linear trend projection

use crate::config::ForecastConfig;
use crate::data::{parse_order_date, SalesRecord};
use crate::error::Result;
use crate::models::linear_trend::{LinearTrend, TrainedLinearTrend};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::MonthlySeries;
use tracing::debug;

/// Project monthly revenue `periods` months past the last observed month
///
/// Records are summed per calendar month, the monthly totals are fitted by
/// least squares against their index, and the line is evaluated at the next
/// `periods` indices. Months with no records are skipped and projections are
/// not clamped.
///
/// ```
/// use sales_forecast::{simple_forecast, SalesRecord};
///
/// let records = vec![
///     SalesRecord::parse("2024-01-15", 100.0).unwrap(),
///     SalesRecord::parse("2024-02-15", 200.0).unwrap(),
///     SalesRecord::parse("2024-03-15", 300.0).unwrap(),
/// ];
/// assert_eq!(simple_forecast(&records, 2).unwrap(), vec![400.0, 500.0]);
/// ```
pub fn simple_forecast(records: &[SalesRecord], periods: usize) -> Result<Vec<f64>> {
    TrendForecaster::new(ForecastConfig::with_periods(periods))
        .forecast(records)
        .map(ForecastResult::into_values)
}

/// Like [`simple_forecast`], for `(date, revenue)` pairs whose dates are still text
pub fn simple_forecast_from_strs<S: AsRef<str>>(
    rows: &[(S, f64)],
    periods: usize,
) -> Result<Vec<f64>> {
    let records = rows
        .iter()
        .map(|(date, revenue)| SalesRecord::new(parse_order_date(date.as_ref())?, *revenue))
        .collect::<Result<Vec<_>>>()?;
    simple_forecast(&records, periods)
}

/// Forecaster configured with a horizon and aggregation policy
#[derive(Debug, Clone, Default)]
pub struct TrendForecaster {
    config: ForecastConfig,
}

impl TrendForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// The trend model this forecaster trains
    pub fn model(&self) -> LinearTrend {
        LinearTrend::new().with_floor_at_zero(self.config.floor_at_zero)
    }

    /// Aggregate records into the monthly series the model is fitted on
    pub fn monthly_series(&self, records: &[SalesRecord]) -> MonthlySeries {
        MonthlySeries::from_records(records, self.config.gap_policy)
    }

    /// Fit the trend to the monthly totals of `records`
    pub fn train(&self, records: &[SalesRecord]) -> Result<TrainedLinearTrend> {
        self.model().train(&self.monthly_series(records))
    }

    /// Project the configured number of months
    pub fn forecast(&self, records: &[SalesRecord]) -> Result<ForecastResult> {
        self.config.validate()?;

        let trained = self.train(records)?;
        let result = trained.forecast(self.config.periods)?;
        debug!(
            periods = self.config.periods,
            model = trained.name(),
            "forecast complete"
        );
        Ok(result)
    }
}
