use sales_forecast::measures::SalesSummary;
use sales_forecast::metrics::evaluate_holdout;
use sales_forecast::{data, DataLoader, ForecastConfig, TrendForecaster};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load data from CSV
    let csv_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("examples")
        .join("csv")
        .join("sales.csv");

    println!("Loading data from: {}", csv_path.display());
    let lines = DataLoader::from_csv(csv_path)?;
    let records = data::to_records(&lines);
    println!("Loaded {} order lines", lines.len());

    let summary = SalesSummary::from_lines(&lines, 3);
    println!("Total revenue: {:.2}", summary.total_revenue);
    for row in &summary.monthly {
        println!("  {}: {:.2}", row.month, row.revenue);
    }

    // Forecast the next 6 months
    let forecaster = TrendForecaster::new(ForecastConfig::default());
    let forecast = forecaster.forecast(&records)?;

    println!("Forecast for the next {} months:", forecast.horizons());
    for (month, value) in forecast.months().iter().zip(forecast.values()) {
        println!("  {}: {:.2}", month, value);
    }

    // How well would the trend have predicted the last two months?
    let series = forecaster.monthly_series(&records);
    let accuracy = evaluate_holdout(&forecaster.model(), &series, 2)?;
    println!("{}", accuracy);

    Ok(())
}
