//! Serializable analysis request and its validation.
//!
//! The request mirrors the dashboard's wire shape (entry points stay
//! strings like `T-1_CLOSE`); validation happens exactly once, before any
//! data access, and produces the parsed configuration the engine runs on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use seasonlab_core::data::EventFilter;
use seasonlab_core::entry::TradeSpec;
use seasonlab_core::window::WindowConfig;

/// Minimum number of valid event windows an analysis needs by default.
pub const DEFAULT_MIN_OCCURRENCES: usize = 3;

/// Configuration errors, raised before any data access. Never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("symbol is required")]
    MissingSymbol,

    #[error("start and end dates are required")]
    MissingDateRange,

    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("at least one of event names or event categories is required")]
    MissingEventSelection,

    #[error("window day counts must be non-negative (got {days_before} before, {days_after} after)")]
    NegativeWindowDays { days_before: i64, days_after: i64 },
}

/// One event-study analysis request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    pub symbol: String,

    #[serde(default)]
    pub event_names: Option<Vec<String>>,
    #[serde(default)]
    pub event_categories: Option<Vec<String>>,
    #[serde(default)]
    pub country: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    pub window: WindowParams,
    pub trade: TradeParams,

    #[serde(default)]
    pub filters: FilterParams,

    /// Also compute the return distribution (histogram, percentiles,
    /// skewness/kurtosis, outliers) for the result.
    #[serde(default)]
    pub include_distribution: bool,
}

/// Window shape as it arrives on the wire. Signed so that a negative count
/// is a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowParams {
    pub days_before: i64,
    pub days_after: i64,
    #[serde(default = "default_include_event_day")]
    pub include_event_day: bool,
}

fn default_include_event_day() -> bool {
    true
}

/// Trade shape as it arrives on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeParams {
    #[serde(default = "default_entry_type")]
    pub entry_type: String,
    /// Exit relative day (exit is always at that session's close).
    pub days_after: i64,
}

fn default_entry_type() -> String {
    "T-1_CLOSE".to_string()
}

/// Optional request filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterParams {
    #[serde(default)]
    pub exclude_years: Option<Vec<i32>>,
    #[serde(default)]
    pub min_occurrences: Option<usize>,
}

/// The validated, parsed form the engine actually runs on.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub window: WindowConfig,
    pub trade: TradeSpec,
    pub filter: EventFilter,
    pub min_occurrences: usize,
}

impl AnalysisRequest {
    /// Validate the request and parse its wire-encoded pieces.
    pub fn validate(&self) -> Result<ResolvedRequest, ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::MissingSymbol);
        }
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(ConfigError::MissingDateRange);
        };
        if start > end {
            return Err(ConfigError::InvertedDateRange { start, end });
        }
        let has_names = self
            .event_names
            .as_ref()
            .is_some_and(|names| !names.is_empty());
        let has_categories = self
            .event_categories
            .as_ref()
            .is_some_and(|categories| !categories.is_empty());
        if !has_names && !has_categories {
            return Err(ConfigError::MissingEventSelection);
        }
        if self.window.days_before < 0 || self.window.days_after < 0 {
            return Err(ConfigError::NegativeWindowDays {
                days_before: self.window.days_before,
                days_after: self.window.days_after,
            });
        }

        Ok(ResolvedRequest {
            symbol: self.symbol.clone(),
            start,
            end,
            window: WindowConfig {
                days_before: self.window.days_before as usize,
                days_after: self.window.days_after as usize,
                include_event_day: self.window.include_event_day,
            },
            trade: TradeSpec::new(&self.trade.entry_type, self.trade.days_after as i32),
            filter: EventFilter {
                names: self.event_names.clone().filter(|n| !n.is_empty()),
                categories: self.event_categories.clone().filter(|c| !c.is_empty()),
                country: self.country.clone(),
                start,
                end,
                exclude_years: self.filters.exclude_years.clone(),
            },
            min_occurrences: self
                .filters
                .min_occurrences
                .unwrap_or(DEFAULT_MIN_OCCURRENCES),
        })
    }

    /// Deterministic content hash of this request.
    ///
    /// Two identical requests share a run id, which is what makes results
    /// cacheable and the idempotence guarantee checkable.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("AnalysisRequest serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
