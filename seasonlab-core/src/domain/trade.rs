//! EventTrade — a completed entry/exit round trip for one event occurrence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A trade derived from one valid event window plus an entry/exit
/// specification. Immutable once computed; consumed by the aggregate
/// metrics and equity curve builders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventTrade {
    // ── Event identity ──
    pub event_name: String,
    pub event_date: NaiveDate,
    pub year: i32,
    pub category: String,

    // ── Entry ──
    pub entry_date: NaiveDate,
    pub entry_price: f64,

    // ── Exit ──
    pub exit_date: NaiveDate,
    pub exit_price: f64,

    // ── Outcome ──
    pub absolute_return: f64,
    pub return_pct: f64,

    // ── Excursion ──
    /// Maximum favorable excursion from entry, in percent (best intraday high).
    pub mfe: f64,
    /// Maximum adverse excursion from entry, in percent (worst intraday low).
    /// Sign is unclamped; typically negative.
    pub mae: f64,

    // ── Duration ──
    /// Holding period in trading sessions (exit relative day - entry relative day).
    pub holding_days: i32,

    /// A flat trade (exactly zero return) does not count as profitable.
    pub is_profitable: bool,
}
