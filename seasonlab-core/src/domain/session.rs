//! TradingSession — one row of historical price data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV record for a single symbol on a single trading date, plus the
/// day-over-day return already computed by the price-series provider.
///
/// Immutable once loaded; owned by the calendar index for the duration of
/// one analysis call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradingSession {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Close-over-previous-close return, in percent.
    pub return_pct: f64,
}

impl TradingSession {
    /// Basic OHLC sanity check: high >= low, high bounds open/close, prices positive.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
