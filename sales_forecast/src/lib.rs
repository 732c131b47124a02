//! # Sales Forecast
//!
//! Monthly revenue aggregation and linear trend forecasting for sales dashboards.
//!
//! ## Features
//!
//! - Sales CSV loading (revenue taken from a `Revenue` column or computed as
//!   `Sale_Price * Quantity`)
//! - Monthly series with an explicit policy for months without sales
//! - Least-squares trend projection over the month index
//! - Headline measures (total revenue, orders, average order value,
//!   month-over-month growth, revenue by product/category/region)
//! - Holdout evaluation of the forecast
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sales_forecast::{DataLoader, ForecastConfig, TrendForecaster};
//!
//! # fn main() -> sales_forecast::Result<()> {
//! let records = DataLoader::records_from_csv("sales.csv")?;
//!
//! let forecaster = TrendForecaster::new(ForecastConfig::with_periods(6));
//! let forecast = forecaster.forecast(&records)?;
//!
//! for (month, value) in forecast.months().iter().zip(forecast.values()) {
//!     println!("{}: {:.2}", month, value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod measures;
pub mod metrics;
pub mod models;
pub mod series;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, OrderLine, SalesRecord};
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::{simple_forecast, simple_forecast_from_strs, TrendForecaster};
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::series::{GapPolicy, MonthlySeries, YearMonth};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
