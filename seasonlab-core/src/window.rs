//! Event window builder — anchors each occurrence to the calendar index and
//! materializes its fixed-width relative-day price window.
//!
//! Window start and end are position indices into the calendar, never date
//! arithmetic: relative day N always means "the Nth trading session
//! before/after T0", regardless of intervening weekends and holidays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::TradingCalendarIndex;
use crate::domain::EventOccurrence;

/// Width of the relative-day window around T0, in trading sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub days_before: usize,
    pub days_after: usize,
    /// When false, the relative-day-0 point is omitted from the average
    /// event curve. Window construction and trades are unaffected.
    pub include_event_day: bool,
}

impl WindowConfig {
    /// Number of bars a complete window holds.
    pub fn width(&self) -> usize {
        self.days_before + self.days_after + 1
    }
}

/// One session inside an event window, tagged with its trading-day offset
/// from T0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowBar {
    /// Signed offset from T0 in trading sessions; 0 exactly at the event day.
    pub relative_day: i32,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub return_pct: f64,
    pub is_event_day: bool,
}

/// The anchored window for one event occurrence.
///
/// Only ever constructed complete: `bars` holds exactly
/// `days_before + days_after + 1` entries with strictly increasing,
/// contiguous relative days and exactly one entry at relative day 0.
/// Occurrences that cannot satisfy this become [`WindowOutcome::Excluded`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventWindow {
    pub event: EventOccurrence,
    /// Position of the event day in the calendar index.
    pub t0_index: usize,
    pub bars: Vec<WindowBar>,
}

impl EventWindow {
    /// The bar at a given relative day, if present.
    pub fn bar_at(&self, relative_day: i32) -> Option<&WindowBar> {
        self.bars.iter().find(|b| b.relative_day == relative_day)
    }
}

/// Why an occurrence was excluded from analysis.
///
/// Display strings are part of the dashboard contract: they surface verbatim
/// in the exclusion-reason counts of the analysis summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExclusionReason {
    #[error("Event day is not a trading day")]
    NotTradingDay,

    #[error("Insufficient data: need {days_before} days before and {days_after} days after")]
    InsufficientData {
        days_before: usize,
        days_after: usize,
    },

    #[error("Missing T0 (event day)")]
    MissingT0,

    #[error("Missing entry day ({entry_type})")]
    MissingEntryDay { entry_type: String },

    #[error("Missing exit day (T+{exit_day})")]
    MissingExitDay { exit_day: i32 },

    #[error("Incomplete window: has {actual} days, needs {expected}")]
    IncompleteWindow { actual: usize, expected: usize },
}

/// Result of anchoring and validating one occurrence.
///
/// Exclusions are data, not errors: one bad occurrence never invalidates
/// the batch, and the reasons fold into the analysis summary.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome {
    Valid(EventWindow),
    Excluded {
        event: EventOccurrence,
        reason: ExclusionReason,
    },
}

impl WindowOutcome {
    pub fn as_valid(&self) -> Option<&EventWindow> {
        match self {
            WindowOutcome::Valid(window) => Some(window),
            WindowOutcome::Excluded { .. } => None,
        }
    }

    pub fn exclusion_reason(&self) -> Option<&ExclusionReason> {
        match self {
            WindowOutcome::Valid(_) => None,
            WindowOutcome::Excluded { reason, .. } => Some(reason),
        }
    }
}

/// Borrow the valid windows out of a batch of outcomes.
pub fn valid_windows(outcomes: &[WindowOutcome]) -> Vec<&EventWindow> {
    outcomes.iter().filter_map(WindowOutcome::as_valid).collect()
}

/// Anchor each occurrence to the calendar and slice out its window.
///
/// Per occurrence:
/// 1. T0 must be an actual trading session. Calendar holidays and weekends
///    cannot anchor a window even when nearby sessions exist.
/// 2. `[t0 - days_before, t0 + days_after]` must lie fully inside the
///    calendar.
///
/// No further validation happens here; completeness with respect to the
/// trade specification is the validator's job.
pub fn build_windows(
    events: &[EventOccurrence],
    calendar: &TradingCalendarIndex,
    config: &WindowConfig,
) -> Vec<WindowOutcome> {
    events
        .iter()
        .map(|event| build_window(event, calendar, config))
        .collect()
}

fn build_window(
    event: &EventOccurrence,
    calendar: &TradingCalendarIndex,
    config: &WindowConfig,
) -> WindowOutcome {
    let Some(t0_index) = calendar.index_of(event.date) else {
        return WindowOutcome::Excluded {
            event: event.clone(),
            reason: ExclusionReason::NotTradingDay,
        };
    };

    let window_start = t0_index as i64 - config.days_before as i64;
    let window_end = t0_index + config.days_after;
    if window_start < 0 || window_end >= calendar.len() {
        return WindowOutcome::Excluded {
            event: event.clone(),
            reason: ExclusionReason::InsufficientData {
                days_before: config.days_before,
                days_after: config.days_after,
            },
        };
    }

    let bars = (window_start as usize..=window_end)
        .map(|position| {
            let relative_day = position as i32 - t0_index as i32;
            let session = &calendar.sessions()[position];
            WindowBar {
                relative_day,
                date: session.date,
                open: session.open,
                high: session.high,
                low: session.low,
                close: session.close,
                volume: session.volume,
                return_pct: session.return_pct,
                is_event_day: relative_day == 0,
            }
        })
        .collect();

    WindowOutcome::Valid(EventWindow {
        event: event.clone(),
        t0_index,
        bars,
    })
}
