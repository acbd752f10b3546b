//! Aggregate metrics — portfolio-style statistics over a set of event trades.
//!
//! Every metric is a pure function: trade list and/or equity curve in,
//! scalar out. Standard deviations are population (divisor N) throughout,
//! matching the dashboard's published figures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use seasonlab_core::domain::EventTrade;
use seasonlab_core::stats::{mean, median, population_std_dev};

use crate::equity::{
    max_drawdown, max_drawdown_period, DrawdownPeriod, EquityPoint, INITIAL_EQUITY,
};

/// Profit factor reported when there are gains and no losses at all.
///
/// A sentinel rather than an optional keeps profit factors comparable and
/// sortable for consumers ranking event strategies.
pub const PROFIT_FACTOR_CAP: f64 = 999.0;

/// The trade with the most extreme return, reported as date + return.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExtremeTrade {
    pub date: NaiveDate,
    pub return_pct: f64,
}

/// Aggregate performance metrics for one event-study analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateMetrics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percent of trades with a strictly positive return.
    pub win_rate: f64,
    pub avg_return: f64,
    pub median_return: f64,
    pub std_dev: f64,
    pub best_event: ExtremeTrade,
    pub worst_event: ExtremeTrade,
    pub profit_factor: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Maximum peak-to-trough equity decline, positive percent.
    pub max_drawdown: f64,
    pub max_drawdown_period: Option<DrawdownPeriod>,
    /// Average return per trade (alias kept for the dashboard).
    pub expectancy: f64,
    /// Final equity minus the starting 100.
    pub total_return: f64,
    /// Annualized growth over the span between first and last event date.
    pub cagr: f64,
}

impl AggregateMetrics {
    /// Compute all metrics from a trade list and its equity curve.
    ///
    /// Returns None for an empty trade list.
    pub fn compute(trades: &[EventTrade], equity_curve: &[EquityPoint]) -> Option<Self> {
        if trades.is_empty() {
            return None;
        }
        let returns: Vec<f64> = trades.iter().map(|t| t.return_pct).collect();
        let winning_trades = trades.iter().filter(|t| t.is_profitable).count();
        let std_dev = population_std_dev(&returns);
        let avg_return = mean(&returns);

        let best = trades
            .iter()
            .max_by(|a, b| a.return_pct.total_cmp(&b.return_pct))?;
        let worst = trades
            .iter()
            .min_by(|a, b| a.return_pct.total_cmp(&b.return_pct))?;

        let final_equity = equity_curve.last().map_or(INITIAL_EQUITY, |p| p.equity);

        Some(Self {
            total_trades: trades.len(),
            winning_trades,
            losing_trades: trades.len() - winning_trades,
            win_rate: 100.0 * winning_trades as f64 / trades.len() as f64,
            avg_return,
            median_return: median(&returns),
            std_dev,
            best_event: ExtremeTrade {
                date: best.event_date,
                return_pct: best.return_pct,
            },
            worst_event: ExtremeTrade {
                date: worst.event_date,
                return_pct: worst.return_pct,
            },
            profit_factor: profit_factor(&returns),
            sharpe_ratio: sharpe_ratio(avg_return, std_dev),
            sortino_ratio: sortino_ratio(&returns, avg_return, std_dev),
            max_drawdown: max_drawdown(equity_curve),
            max_drawdown_period: max_drawdown_period(equity_curve),
            expectancy: avg_return,
            total_return: final_equity - INITIAL_EQUITY,
            cagr: cagr(trades, final_equity),
        })
    }
}

/// Gross profit over gross loss.
///
/// Gross loss is the absolute sum of non-positive returns. With no losses,
/// [`PROFIT_FACTOR_CAP`] when there is any profit, else 0.
pub fn profit_factor(returns: &[f64]) -> f64 {
    let gross_profit: f64 = returns.iter().filter(|&&r| r > 0.0).sum();
    let gross_loss: f64 = returns.iter().filter(|&&r| r <= 0.0).sum::<f64>().abs();

    if gross_loss == 0.0 {
        return if gross_profit > 0.0 {
            PROFIT_FACTOR_CAP
        } else {
            0.0
        };
    }
    gross_profit / gross_loss
}

/// Mean return over population standard deviation; no risk-free-rate
/// subtraction. 0 when the deviation is zero.
pub fn sharpe_ratio(avg_return: f64, std_dev: f64) -> f64 {
    if std_dev < 1e-15 {
        return 0.0;
    }
    avg_return / std_dev
}

/// Mean return over downside deviation.
///
/// Downside deviation is the population stdev of the negative returns
/// alone; with no negative returns it falls back to the full stdev.
pub fn sortino_ratio(returns: &[f64], avg_return: f64, std_dev: f64) -> f64 {
    let negative: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    let downside = if negative.is_empty() {
        std_dev
    } else {
        population_std_dev(&negative)
    };
    if downside < 1e-15 {
        return 0.0;
    }
    avg_return / downside
}

/// Compound annual growth rate over the elapsed calendar span between the
/// first and last trade's event date, in percent. 0 when the span is not
/// positive.
pub fn cagr(trades: &[EventTrade], final_equity: f64) -> f64 {
    let first = trades.iter().map(|t| t.event_date).min();
    let last = trades.iter().map(|t| t.event_date).max();
    let (Some(first), Some(last)) = (first, last) else {
        return 0.0;
    };
    let years = (last - first).num_days() as f64 / 365.25;
    if years <= 0.0 || final_equity <= 0.0 {
        return 0.0;
    }
    ((final_equity / INITIAL_EQUITY).powf(1.0 / years) - 1.0) * 100.0
}
