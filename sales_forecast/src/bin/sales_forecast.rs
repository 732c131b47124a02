//! Sales forecast CLI
//!
//! Loads a sales CSV, prints the monthly revenue series with the dashboard
//! measures, and projects the trend forward.
//!
//! ```text
//! sales_forecast sales.csv --periods 6 --format table
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use sales_forecast::measures::SalesSummary;
use sales_forecast::metrics::evaluate_holdout;
use sales_forecast::{
    data, DataLoader, ForecastConfig, GapPolicy, TrainedForecastModel, TrendForecaster,
};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Monthly sales trend forecaster
#[derive(Parser)]
#[command(name = "sales_forecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sales CSV with an Order_Date column and Revenue or Sale_Price/Quantity
    csv: PathBuf,

    /// Forecast config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Months to forecast (overrides the config file)
    #[arg(short, long)]
    periods: Option<usize>,

    /// Treatment of months without sales: skip or fill-zero
    #[arg(short, long, value_parser = parse_gap_policy)]
    gap_policy: Option<GapPolicy>,

    /// Clamp projected revenue at zero
    #[arg(long)]
    floor_at_zero: bool,

    /// Hold out the last K months and report forecast accuracy on them
    #[arg(long)]
    holdout: Option<usize>,

    /// Entries per breakdown in the summary
    #[arg(long, default_value = "5")]
    top: usize,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    format: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_gap_policy(s: &str) -> std::result::Result<GapPolicy, String> {
    s.parse().map_err(|e: sales_forecast::ForecastError| e.to_string())
}

fn load_config(cli: &Cli) -> Result<ForecastConfig> {
    let mut config = match &cli.config {
        Some(path) => ForecastConfig::from_file(path)?,
        None => ForecastConfig::default(),
    };

    if let Some(periods) = cli.periods {
        config.periods = periods;
    }
    if let Some(gap_policy) = cli.gap_policy {
        config.gap_policy = gap_policy;
    }
    if cli.floor_at_zero {
        config.floor_at_zero = true;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(&cli)?;
    info!(csv = %cli.csv.display(), ?config, "starting forecast");

    let lines = DataLoader::from_csv(&cli.csv)
        .with_context(|| format!("failed to load {}", cli.csv.display()))?;
    let records = data::to_records(&lines);

    let forecaster = TrendForecaster::new(config);
    let series = forecaster.monthly_series(&records);
    let trained = forecaster.train(&records)?;
    let forecast = trained.forecast(forecaster.config().periods)?;
    let summary = SalesSummary::with_series(&lines, &series, cli.top);

    let accuracy = match cli.holdout {
        Some(k) => Some(evaluate_holdout(&forecaster.model(), &series, k)?),
        None => None,
    };

    match cli.format.as_str() {
        "json" => {
            let output = json!({
                "series": series,
                "forecast": forecast,
                "summary": summary,
                "holdout_accuracy": accuracy,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "table" => {
            println!("Total revenue:       {:.2}", summary.total_revenue);
            println!("Orders:              {}", summary.total_orders);
            if let Some(aov) = summary.average_order_value {
                println!("Average order value: {:.2}", aov);
            }

            println!("\n{:<10} {:>14} {:>10}", "Month", "Revenue", "MoM %");
            for row in &summary.monthly {
                let growth = row
                    .growth_pct
                    .map(|g| format!("{:.1}", g))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<10} {:>14.2} {:>10}", row.month, row.revenue, growth);
            }

            if !summary.top_categories.is_empty() {
                println!("\nTop categories:");
                for group in &summary.top_categories {
                    println!("  {:<24} {:>14.2}", group.key, group.revenue);
                }
            }

            println!(
                "\nForecast using {} (slope {:.2}/month):",
                trained.name(),
                forecast.slope()
            );
            for (month, value) in forecast.months().iter().zip(forecast.values()) {
                println!("{:<10} {:>14.2}", month, value);
            }
            if let Some(r2) = forecast.r_squared() {
                println!("R-squared: {:.4}", r2);
            }

            if let Some(accuracy) = accuracy {
                println!("\n{}", accuracy);
            }
        }
        other => bail!("Unknown format: {}. Supported: json, table", other),
    }

    info!("forecast complete");
    Ok(())
}
