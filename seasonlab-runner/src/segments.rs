//! Pre/event/post segmentation of daily returns across valid windows.

use serde::{Deserialize, Serialize};

use seasonlab_core::stats::{mean, median, population_std_dev};
use seasonlab_core::window::EventWindow;

/// Summary statistics for one segment of the window.
///
/// A segment with zero observations reports all-zero stats rather than
/// failing — a window config with `days_before = 0` simply has an empty
/// pre-event segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentStats {
    pub count: usize,
    pub avg_return: f64,
    pub median_return: f64,
    pub std_dev: f64,
    /// Percent of observations with a strictly positive return.
    pub win_rate: f64,
}

impl SegmentStats {
    fn from_returns(returns: &[f64]) -> Self {
        if returns.is_empty() {
            return Self {
                count: 0,
                avg_return: 0.0,
                median_return: 0.0,
                std_dev: 0.0,
                win_rate: 0.0,
            };
        }
        let positive = returns.iter().filter(|&&r| r > 0.0).count();
        Self {
            count: returns.len(),
            avg_return: mean(returns),
            median_return: median(returns),
            std_dev: population_std_dev(returns),
            win_rate: 100.0 * positive as f64 / returns.len() as f64,
        }
    }
}

/// Daily returns split by the sign of the relative day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentedStats {
    pub pre_event: SegmentStats,
    pub event_day: SegmentStats,
    pub post_event: SegmentStats,
}

/// Partition every daily return across all valid windows into pre-event
/// (`relative_day < 0`), event day (`== 0`), and post-event (`> 0`).
pub fn segment_returns(windows: &[&EventWindow]) -> SegmentedStats {
    let mut pre = Vec::new();
    let mut event = Vec::new();
    let mut post = Vec::new();

    for window in windows {
        for bar in &window.bars {
            match bar.relative_day {
                d if d < 0 => pre.push(bar.return_pct),
                0 => event.push(bar.return_pct),
                _ => post.push(bar.return_pct),
            }
        }
    }

    SegmentedStats {
        pre_event: SegmentStats::from_returns(&pre),
        event_day: SegmentStats::from_returns(&event),
        post_event: SegmentStats::from_returns(&post),
    }
}
