//! Period-over-period growth calculations

/// Percent change from `previous` to `current`
///
/// Returns `None` when `previous` is zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous.abs() * 100.0)
    }
}
