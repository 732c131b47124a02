//! Headline sales measures shown on the dashboard

use crate::data::{to_records, OrderLine};
use crate::error::{ForecastError, Result};
use crate::series::{GapPolicy, MonthlySeries, YearMonth};
use sales_math::growth::percent_change;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// Column a revenue breakdown groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Product,
    Category,
    Region,
}

impl Dimension {
    fn key<'a>(&self, line: &'a OrderLine) -> Option<&'a str> {
        match self {
            Dimension::Product => line.product_name.as_deref(),
            Dimension::Category => line.category.as_deref(),
            Dimension::Region => line.region.as_deref(),
        }
    }
}

impl FromStr for Dimension {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "product" | "product_name" => Ok(Dimension::Product),
            "category" => Ok(Dimension::Category),
            "region" => Ok(Dimension::Region),
            other => Err(ForecastError::InvalidArgument(format!(
                "Unknown dimension: {}. Supported: product, category, region",
                other
            ))),
        }
    }
}

/// Sum of revenue over all lines
pub fn total_revenue(lines: &[OrderLine]) -> f64 {
    lines.iter().map(|l| l.revenue).sum()
}

/// Number of orders: distinct order ids, with each id-less line counted on its own
pub fn total_orders(lines: &[OrderLine]) -> usize {
    let mut ids = HashSet::new();
    let mut anonymous = 0;
    for line in lines {
        match &line.order_id {
            Some(id) => {
                ids.insert(id.as_str());
            }
            None => anonymous += 1,
        }
    }
    ids.len() + anonymous
}

/// Revenue per order
pub fn average_order_value(lines: &[OrderLine]) -> Result<f64> {
    let orders = total_orders(lines);
    if orders == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    Ok(total_revenue(lines) / orders as f64)
}

/// Growth of one month's revenue over the previous observed month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyGrowth {
    pub month: YearMonth,
    pub revenue: f64,
    /// Percent change; `None` for the first month or after a zero month
    pub growth_pct: Option<f64>,
}

/// Month-over-month revenue growth along a monthly series
pub fn month_over_month_growth(series: &MonthlySeries) -> Vec<MonthlyGrowth> {
    let mut previous: Option<f64> = None;
    series
        .iter()
        .map(|point| {
            let growth_pct = previous.and_then(|prev| percent_change(prev, point.revenue));
            previous = Some(point.revenue);
            MonthlyGrowth {
                month: point.month,
                revenue: point.revenue,
                growth_pct,
            }
        })
        .collect()
}

/// Revenue of one group in a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRevenue {
    pub key: String,
    pub revenue: f64,
}

/// Revenue per group, largest first, keeping at most `top_n` groups
///
/// Lines with no value for the dimension are grouped under `"(unknown)"`.
/// Ties are broken by key so the order is stable.
pub fn revenue_by(lines: &[OrderLine], dimension: Dimension, top_n: usize) -> Vec<GroupRevenue> {
    let mut groups: HashMap<&str, f64> = HashMap::new();
    for line in lines {
        *groups
            .entry(dimension.key(line).unwrap_or("(unknown)"))
            .or_insert(0.0) += line.revenue;
    }

    let mut ranked: Vec<GroupRevenue> = groups
        .into_iter()
        .map(|(key, revenue)| GroupRevenue {
            key: key.to_string(),
            revenue,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.key.cmp(&b.key))
    });
    ranked.truncate(top_n);
    ranked
}

/// The dashboard's headline numbers in one place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub average_order_value: Option<f64>,
    pub monthly: Vec<MonthlyGrowth>,
    pub top_categories: Vec<GroupRevenue>,
    pub top_products: Vec<GroupRevenue>,
}

impl SalesSummary {
    /// Compute the summary over observed months, keeping `top_n` entries in each breakdown
    pub fn from_lines(lines: &[OrderLine], top_n: usize) -> Self {
        let series = MonthlySeries::from_records(&to_records(lines), GapPolicy::SkipAbsent);
        Self::with_series(lines, &series, top_n)
    }

    /// Compute the summary with the monthly table taken from `series`
    ///
    /// Pass the series a forecast was fitted on so both show the same months.
    pub fn with_series(lines: &[OrderLine], series: &MonthlySeries, top_n: usize) -> Self {
        Self {
            total_revenue: total_revenue(lines),
            total_orders: total_orders(lines),
            average_order_value: average_order_value(lines).ok(),
            monthly: month_over_month_growth(series),
            top_categories: revenue_by(lines, Dimension::Category, top_n),
            top_products: revenue_by(lines, Dimension::Product, top_n),
        }
    }

    /// Serialize the summary as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ForecastError::DataError(format!("cannot serialize summary: {}", e)))
    }
}
