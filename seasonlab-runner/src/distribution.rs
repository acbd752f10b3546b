//! Return distribution — histogram, percentiles, shape statistics, outliers.
//!
//! Complements the aggregate metrics with distribution shape information
//! for the dashboard's histogram panel. All functions are pure: trade list
//! in, distribution out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use seasonlab_core::domain::EventTrade;
use seasonlab_core::stats::{mean, population_std_dev};

/// Fixed number of even-width histogram bins.
pub const HISTOGRAM_BINS: usize = 20;

/// How many population standard deviations from the mean a return must
/// stray to be flagged as an outlier.
pub const OUTLIER_STD_DEVS: f64 = 2.0;

/// One histogram bin, labeled by its numeric range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    pub label: String,
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

/// Nearest-rank percentiles of the return distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Percentiles {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// A trade whose return strays beyond [`OUTLIER_STD_DEVS`] from the mean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outlier {
    pub event_name: String,
    pub event_date: NaiveDate,
    pub return_pct: f64,
    /// Signed distance from the mean in standard deviations.
    pub deviation: f64,
}

/// Shape of the per-trade return distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnDistribution {
    pub histogram: Vec<HistogramBin>,
    pub percentiles: Percentiles,
    /// Bias-corrected sample skewness; 0 with fewer than 3 trades.
    pub skewness: f64,
    /// Bias-corrected excess kurtosis; 0 with fewer than 4 trades.
    pub kurtosis: f64,
    pub outliers: Vec<Outlier>,
    pub sample_size: usize,
}

/// Analyze the distribution of per-trade returns.
pub fn analyze_distribution(trades: &[EventTrade]) -> ReturnDistribution {
    let returns: Vec<f64> = trades.iter().map(|t| t.return_pct).collect();
    let mut sorted = returns.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    ReturnDistribution {
        histogram: histogram(&returns),
        percentiles: Percentiles {
            p10: nearest_rank(&sorted, 0.10),
            p25: nearest_rank(&sorted, 0.25),
            p50: nearest_rank(&sorted, 0.50),
            p75: nearest_rank(&sorted, 0.75),
            p90: nearest_rank(&sorted, 0.90),
        },
        skewness: sample_skewness(&returns),
        kurtosis: sample_excess_kurtosis(&returns),
        outliers: outliers(trades, &returns),
        sample_size: returns.len(),
    }
}

/// Even-width histogram over the observed return range.
///
/// Degenerate inputs (all returns equal, or empty) collapse to a single
/// bin so the dashboard always has something to draw.
fn histogram(returns: &[f64]) -> Vec<HistogramBin> {
    if returns.is_empty() {
        return Vec::new();
    }
    let low = returns.iter().copied().fold(f64::INFINITY, f64::min);
    let high = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (high - low) / HISTOGRAM_BINS as f64;

    if width == 0.0 {
        return vec![HistogramBin {
            label: format!("{low:.2}% to {high:.2}%"),
            low,
            high,
            count: returns.len(),
        }];
    }

    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| {
            let bin_low = low + i as f64 * width;
            let bin_high = bin_low + width;
            HistogramBin {
                label: format!("{bin_low:.2}% to {bin_high:.2}%"),
                low: bin_low,
                high: bin_high,
                count: 0,
            }
        })
        .collect();

    for &r in returns {
        let index = (((r - low) / width) as usize).min(HISTOGRAM_BINS - 1);
        bins[index].count += 1;
    }
    bins
}

/// Nearest-rank percentile on a pre-sorted slice: `floor(n * p)`, clamped
/// so the top percentile cannot index past the end.
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Bias-corrected sample skewness:
/// `n / ((n-1)(n-2)) * sum(((x - mean) / s)^3)` with s the sample stdev.
fn sample_skewness(returns: &[f64]) -> f64 {
    let n = returns.len();
    if n < 3 {
        return 0.0;
    }
    let s = sample_std_dev(returns);
    if s < 1e-15 {
        return 0.0;
    }
    let m = mean(returns);
    let nf = n as f64;
    let sum_cubed: f64 = returns.iter().map(|r| ((r - m) / s).powi(3)).sum();
    nf / ((nf - 1.0) * (nf - 2.0)) * sum_cubed
}

/// Bias-corrected excess kurtosis:
/// `n(n+1) / ((n-1)(n-2)(n-3)) * sum(((x - mean) / s)^4)
///  - 3(n-1)^2 / ((n-2)(n-3))`.
fn sample_excess_kurtosis(returns: &[f64]) -> f64 {
    let n = returns.len();
    if n < 4 {
        return 0.0;
    }
    let s = sample_std_dev(returns);
    if s < 1e-15 {
        return 0.0;
    }
    let m = mean(returns);
    let nf = n as f64;
    let sum_fourth: f64 = returns.iter().map(|r| ((r - m) / s).powi(4)).sum();
    nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * sum_fourth
        - 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0))
}

/// Sample standard deviation (divisor N-1) — the moment formulas above are
/// the one place the engine does not use the population divisor.
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn outliers(trades: &[EventTrade], returns: &[f64]) -> Vec<Outlier> {
    let m = mean(returns);
    let std = population_std_dev(returns);
    if std < 1e-15 {
        return Vec::new();
    }
    trades
        .iter()
        .filter(|t| (t.return_pct - m).abs() > OUTLIER_STD_DEVS * std)
        .map(|t| Outlier {
            event_name: t.event_name.clone(),
            event_date: t.event_date,
            return_pct: t.return_pct,
            deviation: (t.return_pct - m) / std,
        })
        .collect()
}
