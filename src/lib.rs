//! # Sales Dashboard
//!
//! `sales_dashboard` bundles the workspace crates behind the monthly sales
//! dashboard: [`sales_forecast`] for loading, aggregation, measures and the
//! trend forecast, and [`sales_math`] for the numeric kernels.
//!
//! ## Example
//!
//! ```
//! use sales_dashboard::prelude::*;
//!
//! let records = vec![
//!     SalesRecord::parse("2024-01-03", 50.0).unwrap(),
//!     SalesRecord::parse("2024-01-21", 70.0).unwrap(),
//!     SalesRecord::parse("2024-02-11", 140.0).unwrap(),
//! ];
//!
//! let series = MonthlySeries::from_records(&records, GapPolicy::SkipAbsent);
//! assert_eq!(series.totals(), vec![120.0, 140.0]);
//!
//! let forecast = simple_forecast(&records, 2).unwrap();
//! assert_eq!(forecast, vec![160.0, 180.0]);
//! ```

pub use sales_forecast;
pub use sales_math;

/// The types most callers need
pub mod prelude {
    pub use sales_forecast::measures::{Dimension, SalesSummary};
    pub use sales_forecast::{
        simple_forecast, DataLoader, ForecastConfig, ForecastError, ForecastResult, GapPolicy,
        MonthlySeries, OrderLine, SalesRecord, TrendForecaster, YearMonth,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_forecast() {
        let records = vec![
            SalesRecord::parse("2024-01-01", 100.0).unwrap(),
            SalesRecord::parse("2024-02-01", 200.0).unwrap(),
            SalesRecord::parse("2024-03-01", 300.0).unwrap(),
        ];
        assert_eq!(simple_forecast(&records, 2).unwrap(), vec![400.0, 500.0]);
    }

    #[test]
    fn test_default_config_horizon() {
        let records = vec![
            SalesRecord::parse("2024-01-01", 10.0).unwrap(),
            SalesRecord::parse("2024-02-01", 20.0).unwrap(),
        ];
        let result = TrendForecaster::default().forecast(&records).unwrap();
        assert_eq!(result.horizons(), 6);
    }
}
