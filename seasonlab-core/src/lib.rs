//! Seasonlab Core — domain types and the pure event-study components.
//!
//! This crate contains the mechanics of the engine:
//! - Domain types (trading sessions, event occurrences, trades)
//! - Trading calendar index with date-position lookup
//! - Event window builder (trading-day-relative alignment around T0)
//! - Window validator (completeness rules, typed exclusion reasons)
//! - Trade calculator (entry/exit, returns, MFE/MAE)
//! - Average curve builder (per-relative-day cross-event statistics)
//! - Data provider traits at the storage boundary
//!
//! Every component is a pure function over in-memory data; no component
//! performs I/O. Independent analysis requests can run concurrently without
//! locking because each owns its own calendar, windows, and trades.

pub mod calendar;
pub mod curve;
pub mod data;
pub mod domain;
pub mod entry;
pub mod stats;
pub mod trades;
pub mod validate;
pub mod window;

pub use calendar::{CalendarError, TradingCalendarIndex, RANGE_BUFFER_DAYS};
pub use curve::{build_average_curve, CurvePoint};
pub use data::{EventFilter, EventOccurrenceProvider, PriceSeriesProvider, ProviderError, StaticData};
pub use domain::{EventOccurrence, EventTrade, TradingSession};
pub use entry::{EntrySpec, PriceField, TradeSpec};
pub use trades::compute_trades;
pub use validate::validate_windows;
pub use window::{
    build_windows, valid_windows, EventWindow, ExclusionReason, WindowBar, WindowConfig,
    WindowOutcome,
};
