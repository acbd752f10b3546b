//! Average curve builder — cross-event statistics per relative day.
//!
//! Buckets the daily return series of every valid window by relative day
//! (not the trade returns — each window contributes one observation per
//! day it covers) and reduces each bucket to summary statistics.

use serde::{Deserialize, Serialize};

use crate::stats::{mean, median, population_std_dev};
use crate::window::{EventWindow, WindowConfig};

/// Cross-event statistics for one relative day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub relative_day: i32,
    pub avg_return: f64,
    pub median_return: f64,
    pub std_dev: f64,
    pub count: usize,
    pub min_return: f64,
    pub max_return: f64,
    pub is_event_day: bool,
}

/// Build the average event curve over `[-days_before, +days_after]`.
///
/// Buckets with zero contributions are omitted entirely, never zero-filled;
/// the validator's completeness check means this only matters defensively.
/// When `include_event_day` is off, the relative-day-0 point is dropped.
/// Output is sorted ascending by relative day.
pub fn build_average_curve(windows: &[&EventWindow], config: &WindowConfig) -> Vec<CurvePoint> {
    let first = -(config.days_before as i32);
    let last = config.days_after as i32;

    (first..=last)
        .filter(|&relative_day| config.include_event_day || relative_day != 0)
        .filter_map(|relative_day| {
            let returns: Vec<f64> = windows
                .iter()
                .filter_map(|w| w.bar_at(relative_day))
                .map(|b| b.return_pct)
                .collect();
            if returns.is_empty() {
                return None;
            }
            Some(CurvePoint {
                relative_day,
                avg_return: mean(&returns),
                median_return: median(&returns),
                std_dev: population_std_dev(&returns),
                count: returns.len(),
                min_return: returns.iter().copied().fold(f64::INFINITY, f64::min),
                max_return: returns.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                is_event_day: relative_day == 0,
            })
        })
        .collect()
}
