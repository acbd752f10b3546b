//! Analysis engine — wires together calendar, windows, trades, and metrics.
//!
//! Two entry points:
//! - `run_analysis()`: fetches sessions and occurrences through the provider
//!   traits, then runs. Used by the API layer.
//! - `run_analysis_from_data()`: takes pre-loaded sessions and occurrences.
//!   Used by batch jobs and tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use seasonlab_core::calendar::{CalendarError, TradingCalendarIndex};
use seasonlab_core::curve::{build_average_curve, CurvePoint};
use seasonlab_core::data::{
    EventOccurrenceProvider, PriceSeriesProvider, ProviderError, StaticData,
};
use seasonlab_core::domain::{EventOccurrence, EventTrade, TradingSession};
use seasonlab_core::trades::compute_trades;
use seasonlab_core::validate::validate_windows;
use seasonlab_core::window::{build_windows, valid_windows, WindowOutcome};

use crate::distribution::{analyze_distribution, ReturnDistribution};
use crate::equity::{build_equity_curve, EquityPoint};
use crate::metrics::AggregateMetrics;
use crate::request::{AnalysisRequest, ConfigError};
use crate::segments::{segment_returns, SegmentedStats};

/// Current schema version for persisted results.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors that abort an analysis. Per-occurrence exclusions are not errors;
/// they fold into the summary instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] CalendarError),

    #[error("event data unavailable: {0}")]
    EventData(#[from] ProviderError),

    #[error(
        "insufficient valid events: found {found}, valid {valid}, required {required} \
         ({excluded} excluded)"
    )]
    InsufficientEvents {
        found: usize,
        valid: usize,
        required: usize,
        excluded: usize,
    },
}

/// How the occurrence batch fared against the calendar and the validator.
///
/// `exclusion_reasons` maps the display string of each reason to how many
/// occurrences it excluded. A BTreeMap keeps serialization order stable so
/// identical requests produce byte-identical results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventSummary {
    pub total_events_found: usize,
    pub valid_events: usize,
    pub excluded_events: usize,
    pub exclusion_reasons: BTreeMap<String, usize>,
}

/// Complete result of one event-study analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Content hash of the request that produced this result.
    pub run_id: String,
    pub symbol: String,
    pub event_summary: EventSummary,
    pub average_event_curve: Vec<CurvePoint>,
    pub segmented_stats: SegmentedStats,
    pub event_occurrences: Vec<EventTrade>,
    pub aggregate_metrics: Option<AggregateMetrics>,
    pub equity_curve: Vec<EquityPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<ReturnDistribution>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run a full event-study analysis against the data providers.
pub fn run_analysis(
    request: &AnalysisRequest,
    prices: &dyn PriceSeriesProvider,
    events: &dyn EventOccurrenceProvider,
) -> Result<AnalysisResult, AnalysisError> {
    let resolved = request.validate()?;

    let calendar =
        TradingCalendarIndex::load(prices, &resolved.symbol, resolved.start, resolved.end)?;
    let occurrences = events.event_occurrences(&resolved.filter)?;

    let outcomes = validate_windows(
        build_windows(&occurrences, &calendar, &resolved.window),
        &resolved.window,
        &resolved.trade,
    );
    let windows = valid_windows(&outcomes);
    let summary = summarize(&outcomes);

    if windows.len() < resolved.min_occurrences {
        return Err(AnalysisError::InsufficientEvents {
            found: summary.total_events_found,
            valid: summary.valid_events,
            required: resolved.min_occurrences,
            excluded: summary.excluded_events,
        });
    }

    let trades = compute_trades(&windows, &resolved.trade);
    let average_event_curve = build_average_curve(&windows, &resolved.window);
    let segmented_stats = segment_returns(&windows);
    let equity_curve = build_equity_curve(&trades);
    let aggregate_metrics = AggregateMetrics::compute(&trades, &equity_curve);
    let distribution = request
        .include_distribution
        .then(|| analyze_distribution(&trades));

    Ok(AnalysisResult {
        schema_version: SCHEMA_VERSION,
        run_id: request.run_id(),
        symbol: resolved.symbol,
        event_summary: summary,
        average_event_curve,
        segmented_stats,
        event_occurrences: trades,
        aggregate_metrics,
        equity_curve,
        distribution,
    })
}

/// Run an analysis over pre-loaded sessions and occurrences.
///
/// The occurrence list still goes through the request's event filter, so
/// both entry points behave identically for the same data.
pub fn run_analysis_from_data(
    request: &AnalysisRequest,
    sessions: Vec<TradingSession>,
    occurrences: Vec<EventOccurrence>,
) -> Result<AnalysisResult, AnalysisError> {
    let data = StaticData::new(sessions, occurrences);
    run_analysis(request, &data, &data)
}

fn summarize(outcomes: &[WindowOutcome]) -> EventSummary {
    let mut exclusion_reasons = BTreeMap::new();
    let mut valid_events = 0usize;
    for outcome in outcomes {
        match outcome {
            WindowOutcome::Valid(_) => valid_events += 1,
            WindowOutcome::Excluded { reason, .. } => {
                *exclusion_reasons.entry(reason.to_string()).or_insert(0) += 1;
            }
        }
    }
    EventSummary {
        total_events_found: outcomes.len(),
        valid_events,
        excluded_events: outcomes.len() - valid_events,
        exclusion_reasons,
    }
}
