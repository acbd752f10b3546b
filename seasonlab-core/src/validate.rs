//! Window validator — completeness rules relative to the trade specification.
//!
//! A pure pass over builder outcomes: valid windows are re-checked against
//! the entry/exit requirements and demoted to exclusions when a required
//! bar is missing. Already-excluded outcomes pass through untouched so the
//! builder's reasons survive into the summary.

use crate::entry::TradeSpec;
use crate::window::{EventWindow, ExclusionReason, WindowConfig, WindowOutcome};

/// Validate each window against the trade requirements.
///
/// Checks run in order and short-circuit on the first failure:
/// 1. relative day 0 is present
/// 2. the entry relative day is present
/// 3. the exit relative day is present
/// 4. the window holds exactly `days_before + days_after + 1` bars
///
/// Given how the builder materializes windows these cannot fail, but the
/// rules hold defensively: a window that somehow arrives incomplete is
/// excluded with a precise reason instead of producing a bad trade.
pub fn validate_windows(
    outcomes: Vec<WindowOutcome>,
    window_config: &WindowConfig,
    trade_spec: &TradeSpec,
) -> Vec<WindowOutcome> {
    outcomes
        .into_iter()
        .map(|outcome| match outcome {
            WindowOutcome::Valid(window) => match check_window(&window, window_config, trade_spec) {
                None => WindowOutcome::Valid(window),
                Some(reason) => WindowOutcome::Excluded {
                    event: window.event,
                    reason,
                },
            },
            excluded @ WindowOutcome::Excluded { .. } => excluded,
        })
        .collect()
}

fn check_window(
    window: &EventWindow,
    window_config: &WindowConfig,
    trade_spec: &TradeSpec,
) -> Option<ExclusionReason> {
    if window.bar_at(0).is_none() {
        return Some(ExclusionReason::MissingT0);
    }
    if window.bar_at(trade_spec.entry.relative_day).is_none() {
        return Some(ExclusionReason::MissingEntryDay {
            entry_type: trade_spec.entry_type.clone(),
        });
    }
    if window.bar_at(trade_spec.exit_day).is_none() {
        return Some(ExclusionReason::MissingExitDay {
            exit_day: trade_spec.exit_day,
        });
    }
    let expected = window_config.width();
    if window.bars.len() != expected {
        return Some(ExclusionReason::IncompleteWindow {
            actual: window.bars.len(),
            expected,
        });
    }
    None
}
