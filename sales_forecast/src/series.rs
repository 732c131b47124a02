//! Monthly aggregation of sales records

use crate::data::SalesRecord;
use crate::error::{ForecastError, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month; `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidArgument(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Months from `self` forward to `later` (negative if `later` is earlier)
    pub fn months_until(&self, later: &YearMonth) -> i64 {
        (later.year as i64 - self.year as i64) * 12 + (later.month as i64 - self.month as i64)
    }

    /// The `count` months immediately after this one
    pub fn following(&self, count: usize) -> Vec<YearMonth> {
        let mut months = Vec::with_capacity(count);
        let mut current = *self;
        for _ in 0..count {
            current = current.succ();
            months.push(current);
        }
        months
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s.trim().split_once('-').ok_or_else(|| {
            ForecastError::ParseError(format!("Expected YYYY-MM, got '{}'", s))
        })?;
        Self::new(year.parse()?, month.parse()?)
    }
}

/// How months with no sales between the first and last observed month are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// Index only the months that have records
    #[default]
    SkipAbsent,
    /// Insert a zero-revenue month for every gap
    FillZero,
}

impl FromStr for GapPolicy {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "skip-absent" | "skip_absent" => Ok(GapPolicy::SkipAbsent),
            "fill-zero" | "fill_zero" | "zero" => Ok(GapPolicy::FillZero),
            other => Err(ForecastError::InvalidArgument(format!(
                "Unknown gap policy: {}. Supported: skip, fill-zero",
                other
            ))),
        }
    }
}

/// Total revenue of one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub revenue: f64,
}

/// Chronologically ordered monthly revenue totals
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonthlySeries {
    points: Vec<MonthlyTotal>,
}

impl MonthlySeries {
    /// Group records by calendar month and sum their revenue
    pub fn from_records(records: &[SalesRecord], gap_policy: GapPolicy) -> Self {
        let mut buckets: BTreeMap<YearMonth, f64> = BTreeMap::new();
        for record in records {
            *buckets
                .entry(YearMonth::from_date(&record.order_date))
                .or_insert(0.0) += record.revenue;
        }

        if gap_policy == GapPolicy::FillZero {
            let bounds = buckets
                .keys()
                .next()
                .copied()
                .zip(buckets.keys().next_back().copied());
            if let Some((first, last)) = bounds {
                let mut current = first;
                while current < last {
                    current = current.succ();
                    buckets.entry(current).or_insert(0.0);
                }
            }
        }

        debug!(
            records = records.len(),
            months = buckets.len(),
            ?gap_policy,
            "aggregated monthly series"
        );

        Self {
            points: buckets
                .into_iter()
                .map(|(month, revenue)| MonthlyTotal { month, revenue })
                .collect(),
        }
    }

    /// Build a series from already-aggregated totals; months must be strictly increasing
    pub fn from_totals(points: Vec<MonthlyTotal>) -> Result<Self> {
        if let Some(w) = points.windows(2).find(|w| w[0].month >= w[1].month) {
            return Err(ForecastError::InvalidArgument(format!(
                "Months must be strictly increasing, found {} before {}",
                w[0].month, w[1].month
            )));
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The months in chronological order
    pub fn months(&self) -> Vec<YearMonth> {
        self.points.iter().map(|p| p.month).collect()
    }

    /// The revenue totals in chronological order
    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.revenue).collect()
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.points.first().map(|p| p.month)
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.points.last().map(|p| p.month)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyTotal> {
        self.points.iter()
    }

    /// Split off the last `count` months as a holdout set
    pub fn split_last(&self, count: usize) -> Result<(MonthlySeries, MonthlySeries)> {
        if count >= self.len() {
            return Err(ForecastError::InsufficientData {
                needed: count + 1,
                got: self.len(),
            });
        }

        let cut = self.len() - count;
        Ok((
            MonthlySeries {
                points: self.points[..cut].to_vec(),
            },
            MonthlySeries {
                points: self.points[cut..].to_vec(),
            },
        ))
    }
}
