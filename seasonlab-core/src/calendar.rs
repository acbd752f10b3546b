//! Trading calendar index — ordered sessions with date-position lookup.
//!
//! The leaf dependency for everything downstream: event windows are sliced
//! out of this index by position, never by date arithmetic, which is what
//! makes relative-day alignment deterministic across weekends and holidays.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::data::provider::{PriceSeriesProvider, ProviderError};
use crate::domain::TradingSession;

/// Calendar days added on each side of the requested range before querying
/// the price provider, so windows anchored near the range boundary can still
/// be resolved.
pub const RANGE_BUFFER_DAYS: i64 = 60;

/// Errors from calendar construction.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("no trading sessions for '{symbol}' in the buffered request range")]
    NoSessions { symbol: String },

    #[error("sessions for '{symbol}' are not strictly ascending by date at position {position}")]
    OutOfOrder { symbol: String, position: usize },
}

/// Ordered trading sessions for one symbol plus a date-keyed position lookup.
///
/// Invariants: dates strictly increasing, no duplicates. Read-only after
/// construction. Lookup is keyed by `NaiveDate` (a pure calendar date), so
/// there is no timezone drift to worry about.
#[derive(Debug, Clone)]
pub struct TradingCalendarIndex {
    sessions: Vec<TradingSession>,
    positions: HashMap<NaiveDate, usize>,
}

impl TradingCalendarIndex {
    /// Build the index from sessions already in hand.
    ///
    /// Fails if the sequence is empty or not strictly ascending by date.
    pub fn from_sessions(
        symbol: &str,
        sessions: Vec<TradingSession>,
    ) -> Result<Self, CalendarError> {
        if sessions.is_empty() {
            return Err(CalendarError::NoSessions {
                symbol: symbol.to_string(),
            });
        }
        let mut positions = HashMap::with_capacity(sessions.len());
        for (i, session) in sessions.iter().enumerate() {
            if i > 0 && sessions[i - 1].date >= session.date {
                return Err(CalendarError::OutOfOrder {
                    symbol: symbol.to_string(),
                    position: i,
                });
            }
            positions.insert(session.date, i);
        }
        Ok(Self { sessions, positions })
    }

    /// Fetch sessions for `[start, end]` expanded by [`RANGE_BUFFER_DAYS`]
    /// on each side, then index them.
    pub fn load(
        provider: &dyn PriceSeriesProvider,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, CalendarError> {
        let buffered_start = start - Duration::days(RANGE_BUFFER_DAYS);
        let buffered_end = end + Duration::days(RANGE_BUFFER_DAYS);
        let sessions = provider.trading_sessions(symbol, buffered_start, buffered_end)?;
        Self::from_sessions(symbol, sessions)
    }

    /// Position of `date` in the session sequence, or None if no session
    /// exists on that calendar date (weekend, holiday, missing row).
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.positions.get(&date).copied()
    }

    pub fn get(&self, position: usize) -> Option<&TradingSession> {
        self.sessions.get(position)
    }

    pub fn sessions(&self) -> &[TradingSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticData;

    fn session(date: NaiveDate, close: f64) -> TradingSession {
        TradingSession {
            date,
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1_000,
            return_pct: 0.0,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn index_of_finds_positions() {
        let cal = TradingCalendarIndex::from_sessions(
            "NIFTY",
            vec![
                session(ymd(2024, 1, 2), 100.0),
                session(ymd(2024, 1, 3), 101.0),
                session(ymd(2024, 1, 4), 102.0),
            ],
        )
        .unwrap();
        assert_eq!(cal.len(), 3);
        assert_eq!(cal.index_of(ymd(2024, 1, 3)), Some(1));
        // 2024-01-06 is a Saturday with no session row.
        assert_eq!(cal.index_of(ymd(2024, 1, 6)), None);
    }

    #[test]
    fn empty_sessions_are_rejected() {
        let err = TradingCalendarIndex::from_sessions("NIFTY", vec![]).unwrap_err();
        assert!(matches!(err, CalendarError::NoSessions { .. }));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let err = TradingCalendarIndex::from_sessions(
            "NIFTY",
            vec![
                session(ymd(2024, 1, 2), 100.0),
                session(ymd(2024, 1, 2), 101.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::OutOfOrder { position: 1, .. }));
    }

    #[test]
    fn load_expands_the_requested_range() {
        // Sessions only exist inside the buffer zone, before the requested
        // start: the buffered query must still pick them up.
        let data = StaticData::new(
            vec![
                session(ymd(2024, 1, 2), 100.0),
                session(ymd(2024, 1, 3), 101.0),
            ],
            vec![],
        );
        let cal =
            TradingCalendarIndex::load(&data, "NIFTY", ymd(2024, 2, 1), ymd(2024, 3, 1)).unwrap();
        assert_eq!(cal.len(), 2);
    }

    #[test]
    fn load_fails_on_empty_range() {
        let data = StaticData::new(vec![], vec![]);
        let err = TradingCalendarIndex::load(&data, "NIFTY", ymd(2024, 2, 1), ymd(2024, 3, 1))
            .unwrap_err();
        assert!(matches!(err, CalendarError::NoSessions { .. }));
    }
}
