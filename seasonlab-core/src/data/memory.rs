//! In-memory provider over pre-loaded data.
//!
//! Backs the from-data engine entry point and the test suites. Sessions are
//! sorted on construction so callers can hand over unordered rows.

use chrono::NaiveDate;

use super::provider::{
    EventFilter, EventOccurrenceProvider, PriceSeriesProvider, ProviderError,
};
use crate::domain::{EventOccurrence, TradingSession};

/// Vec-backed implementation of both provider traits.
#[derive(Debug, Clone, Default)]
pub struct StaticData {
    sessions: Vec<TradingSession>,
    events: Vec<EventOccurrence>,
}

impl StaticData {
    pub fn new(mut sessions: Vec<TradingSession>, mut events: Vec<EventOccurrence>) -> Self {
        sessions.sort_by_key(|s| s.date);
        events.sort_by_key(|e| e.date);
        Self { sessions, events }
    }
}

impl PriceSeriesProvider for StaticData {
    fn trading_sessions(
        &self,
        _symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradingSession>, ProviderError> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.date >= start && s.date <= end)
            .cloned()
            .collect())
    }
}

impl EventOccurrenceProvider for StaticData {
    fn event_occurrences(&self, filter: &EventFilter) -> Result<Vec<EventOccurrence>, ProviderError> {
        Ok(self
            .events
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}
