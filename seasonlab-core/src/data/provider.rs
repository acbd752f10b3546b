//! Data provider traits and structured error types.
//!
//! The engine never touches a database: price history and event occurrences
//! arrive through these two traits, implemented by the storage layer and
//! mocked in-memory for tests.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{EventOccurrence, TradingSession};

/// Structured error types for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider error: {0}")]
    Other(String),
}

/// Filter for event-occurrence queries.
///
/// Selection is by exact name set or by category set; when both are given,
/// names take precedence. `exclude_years` drops whole recurrence years
/// (e.g. a year with a known data problem).
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    pub names: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub country: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub exclude_years: Option<Vec<i32>>,
}

impl EventFilter {
    /// Whether one occurrence passes this filter.
    pub fn matches(&self, event: &EventOccurrence) -> bool {
        if event.date < self.start || event.date > self.end {
            return false;
        }
        if let Some(country) = &self.country {
            if &event.country != country {
                return false;
            }
        }
        if let Some(years) = &self.exclude_years {
            if years.contains(&event.year) {
                return false;
            }
        }
        // Name selection takes precedence over category selection.
        if let Some(names) = &self.names {
            return names.iter().any(|n| n == &event.name);
        }
        if let Some(categories) = &self.categories {
            return categories.iter().any(|c| c == &event.category);
        }
        true
    }
}

/// Source of historical trading sessions for a symbol.
pub trait PriceSeriesProvider: Send + Sync {
    /// Fetch all trading sessions for `symbol` in `[start, end]`, ascending
    /// by date, with no gaps beyond actual non-trading days.
    fn trading_sessions(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradingSession>, ProviderError>;
}

/// Source of raw event occurrences.
pub trait EventOccurrenceProvider: Send + Sync {
    /// Fetch occurrences passing `filter`, ascending by date.
    fn event_occurrences(&self, filter: &EventFilter) -> Result<Vec<EventOccurrence>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(name: &str, category: &str, country: &str, year: i32) -> EventOccurrence {
        EventOccurrence {
            name: name.into(),
            date: NaiveDate::from_ymd_opt(year, 6, 15).unwrap(),
            year,
            category: category.into(),
            country: country.into(),
        }
    }

    fn wide_filter() -> EventFilter {
        EventFilter {
            names: None,
            categories: None,
            country: None,
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            exclude_years: None,
        }
    }

    #[test]
    fn filter_by_name_takes_precedence_over_category() {
        let filter = EventFilter {
            names: Some(vec!["Budget Day".into()]),
            categories: Some(vec!["Religious".into()]),
            ..wide_filter()
        };
        // Matches by name even though the category set does not contain it.
        assert!(filter.matches(&occurrence("Budget Day", "Fiscal", "IN", 2020)));
        // Category match alone is not enough once names are given.
        assert!(!filter.matches(&occurrence("Diwali", "Religious", "IN", 2020)));
    }

    #[test]
    fn filter_by_category() {
        let filter = EventFilter {
            categories: Some(vec!["Fiscal".into()]),
            ..wide_filter()
        };
        assert!(filter.matches(&occurrence("Budget Day", "Fiscal", "IN", 2020)));
        assert!(!filter.matches(&occurrence("Diwali", "Religious", "IN", 2020)));
    }

    #[test]
    fn filter_excludes_years_and_countries() {
        let filter = EventFilter {
            country: Some("IN".into()),
            exclude_years: Some(vec![2020]),
            ..wide_filter()
        };
        assert!(!filter.matches(&occurrence("Budget Day", "Fiscal", "IN", 2020)));
        assert!(filter.matches(&occurrence("Budget Day", "Fiscal", "IN", 2021)));
        assert!(!filter.matches(&occurrence("Budget Day", "Fiscal", "US", 2021)));
    }

    #[test]
    fn filter_enforces_date_range() {
        let filter = EventFilter {
            start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            ..wide_filter()
        };
        assert!(!filter.matches(&occurrence("Budget Day", "Fiscal", "IN", 2020)));
        assert!(filter.matches(&occurrence("Budget Day", "Fiscal", "IN", 2021)));
    }
}
