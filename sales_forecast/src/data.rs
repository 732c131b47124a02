//! Sales data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Date-only formats accepted for `Order_Date`
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Datetime formats accepted for `Order_Date`; only the date part is kept
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A dated revenue amount, the unit the forecaster aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date of the order
    pub order_date: NaiveDate,
    /// Revenue of the order (price times quantity)
    pub revenue: f64,
}

impl SalesRecord {
    /// Create a new sales record, rejecting non-finite revenue
    pub fn new(order_date: NaiveDate, revenue: f64) -> Result<Self> {
        if !revenue.is_finite() {
            return Err(ForecastError::DataError(format!(
                "Revenue on {} is not finite",
                order_date
            )));
        }

        Ok(Self {
            order_date,
            revenue,
        })
    }

    /// Create a sales record from an unparsed date string
    pub fn parse(order_date: &str, revenue: f64) -> Result<Self> {
        Self::new(parse_order_date(order_date)?, revenue)
    }
}

/// Parse an order date in any of the formats the sales exports use
pub fn parse_order_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.date_naive());
    }

    Err(ForecastError::ParseError(format!(
        "Cannot interpret '{}' as a date",
        input
    )))
}

/// One row of the sales dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    /// Order identifier; several lines may share one order
    pub order_id: Option<String>,
    /// Calendar date of the order
    pub order_date: NaiveDate,
    /// Product sold on this line
    pub product_name: Option<String>,
    /// Product category
    pub category: Option<String>,
    /// Sales region
    pub region: Option<String>,
    /// Unit sale price, when the dataset carries it
    pub sale_price: Option<f64>,
    /// Units sold, when the dataset carries it
    pub quantity: Option<f64>,
    /// Revenue of the line
    pub revenue: f64,
}

impl OrderLine {
    /// The dated revenue amount of this line
    pub fn record(&self) -> SalesRecord {
        SalesRecord {
            order_date: self.order_date,
            revenue: self.revenue,
        }
    }
}

/// Collect the sales records of a set of order lines
pub fn to_records(lines: &[OrderLine]) -> Vec<SalesRecord> {
    lines.iter().map(OrderLine::record).collect()
}

/// Row layout as exported, before dates are parsed and revenue derived
#[derive(Debug, Deserialize)]
struct RawOrderRow {
    #[serde(default, rename = "Order_ID", alias = "order_id", alias = "OrderID")]
    order_id: Option<String>,
    #[serde(
        rename = "Order_Date",
        alias = "order_date",
        alias = "OrderDate",
        alias = "Date",
        alias = "date"
    )]
    order_date: String,
    #[serde(
        default,
        rename = "Product_Name",
        alias = "product_name",
        alias = "Product",
        alias = "product"
    )]
    product_name: Option<String>,
    #[serde(default, rename = "Category", alias = "category")]
    category: Option<String>,
    #[serde(default, rename = "Region", alias = "region")]
    region: Option<String>,
    #[serde(
        default,
        rename = "Sale_Price",
        alias = "sale_price",
        alias = "Price",
        alias = "price"
    )]
    sale_price: Option<f64>,
    #[serde(default, rename = "Quantity", alias = "quantity", alias = "Qty")]
    quantity: Option<f64>,
    #[serde(default, rename = "Revenue", alias = "revenue", alias = "Sales")]
    revenue: Option<f64>,
}

impl RawOrderRow {
    fn into_order_line(self, line: usize) -> Result<OrderLine> {
        let order_date = parse_order_date(&self.order_date).map_err(|e| match e {
            ForecastError::ParseError(msg) => {
                ForecastError::ParseError(format!("line {}: {}", line, msg))
            }
            other => other,
        })?;

        let revenue = match (self.revenue, self.sale_price, self.quantity) {
            (Some(revenue), _, _) => revenue,
            (None, Some(price), Some(quantity)) => price * quantity,
            _ => {
                return Err(ForecastError::DataError(format!(
                    "line {}: no Revenue value and no Sale_Price/Quantity pair",
                    line
                )))
            }
        };

        let record = SalesRecord::new(order_date, revenue)
            .map_err(|e| ForecastError::DataError(format!("line {}: {}", line, e)))?;

        Ok(OrderLine {
            order_id: non_empty(self.order_id),
            order_date: record.order_date,
            product_name: non_empty(self.product_name),
            category: non_empty(self.category),
            region: non_empty(self.region),
            sale_price: self.sale_price,
            quantity: self.quantity,
            revenue: record.revenue,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Data loader for sales exports
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load order lines from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<OrderLine>> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading sales csv");
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load order lines from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<OrderLine>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut lines = Vec::new();
        for (idx, row) in csv_reader.deserialize::<RawOrderRow>().enumerate() {
            // Header is line 1
            let line = idx + 2;
            lines.push(row?.into_order_line(line)?);
        }

        if lines.is_empty() {
            return Err(ForecastError::DataError(
                "Sales data contains no rows".to_string(),
            ));
        }

        let negative = lines.iter().filter(|l| l.revenue < 0.0).count();
        if negative > 0 {
            warn!(negative, "sales data contains negative revenue lines");
        }

        debug!(rows = lines.len(), "loaded order lines");
        Ok(lines)
    }

    /// Load a CSV file straight into sales records
    pub fn records_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>> {
        Ok(to_records(&Self::from_csv(path)?))
    }
}
