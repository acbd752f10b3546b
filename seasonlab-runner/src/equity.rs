//! Equity curve and drawdown — sequential compounding across event trades.
//!
//! Trades are compounded back-to-back in event-date order from a base of
//! 100, regardless of the actual calendar gap between them. Overlapping
//! holding periods are NOT modeled as simultaneous capital deployment; this
//! is a deliberate simplification of the product, not an approximation to
//! tighten later.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use seasonlab_core::domain::EventTrade;

/// Starting equity for every curve.
pub const INITIAL_EQUITY: f64 = 100.0;

/// One point on the equity curve. The first point is the anchor at
/// [`INITIAL_EQUITY`] and carries no trade metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub return_pct: Option<f64>,
}

/// Peak-to-trough span of the deepest drawdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DrawdownPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Compound trades in event-date order from a base of 100.
///
/// Returns an empty curve for an empty trade list; otherwise the first
/// point anchors at 100 on the first trade's entry date and each
/// subsequent point is the prior equity times `1 + return/100`.
pub fn build_equity_curve(trades: &[EventTrade]) -> Vec<EquityPoint> {
    if trades.is_empty() {
        return Vec::new();
    }
    let mut ordered: Vec<&EventTrade> = trades.iter().collect();
    ordered.sort_by_key(|t| t.event_date);

    let mut curve = Vec::with_capacity(ordered.len() + 1);
    curve.push(EquityPoint {
        date: ordered[0].entry_date,
        equity: INITIAL_EQUITY,
        event_name: None,
        return_pct: None,
    });

    let mut equity = INITIAL_EQUITY;
    for trade in ordered {
        equity *= 1.0 + trade.return_pct / 100.0;
        curve.push(EquityPoint {
            date: trade.event_date,
            equity,
            event_name: Some(trade.event_name.clone()),
            return_pct: Some(trade.return_pct),
        });
    }
    curve
}

/// Maximum peak-to-trough decline, as a positive percentage.
///
/// 0.0 exactly when equity never declines.
pub fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    scan_drawdown(curve).map_or(0.0, |d| d.depth_pct)
}

/// Date span of the deepest drawdown, from the peak point to the trough
/// point. None when the curve never declines.
pub fn max_drawdown_period(curve: &[EquityPoint]) -> Option<DrawdownPeriod> {
    let scan = scan_drawdown(curve)?;
    if scan.depth_pct == 0.0 {
        return None;
    }
    Some(DrawdownPeriod {
        start: curve[scan.peak_index].date,
        end: curve[scan.trough_index].date,
    })
}

struct DrawdownScan {
    depth_pct: f64,
    peak_index: usize,
    trough_index: usize,
}

fn scan_drawdown(curve: &[EquityPoint]) -> Option<DrawdownScan> {
    let first = curve.first()?;
    let mut peak = first.equity;
    let mut peak_index = 0;
    let mut deepest = DrawdownScan {
        depth_pct: 0.0,
        peak_index: 0,
        trough_index: 0,
    };

    for (i, point) in curve.iter().enumerate() {
        if point.equity > peak {
            peak = point.equity;
            peak_index = i;
        }
        if peak > 0.0 {
            let drawdown = (peak - point.equity) / peak * 100.0;
            if drawdown > deepest.depth_pct {
                deepest = DrawdownScan {
                    depth_pct: drawdown,
                    peak_index,
                    trough_index: i,
                };
            }
        }
    }
    Some(deepest)
}
