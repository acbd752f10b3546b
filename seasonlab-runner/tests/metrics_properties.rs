//! Property tests for equity and aggregate-metric invariants.

use chrono::NaiveDate;
use proptest::prelude::*;

use seasonlab_core::domain::EventTrade;
use seasonlab_runner::equity::{build_equity_curve, max_drawdown, max_drawdown_period};
use seasonlab_runner::metrics::{AggregateMetrics, PROFIT_FACTOR_CAP};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_return_pct() -> impl Strategy<Value = f64> {
    // Realistic event-return territory; keeps equity strictly positive.
    (-50.0..80.0_f64).prop_map(|r| (r * 100.0).round() / 100.0)
}

fn trades_from(returns: &[f64]) -> Vec<EventTrade> {
    returns
        .iter()
        .enumerate()
        .map(|(i, &return_pct)| {
            let year = 1990 + i as i32;
            EventTrade {
                event_name: "Recurring Event".into(),
                event_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
                year,
                category: "Test".into(),
                entry_date: NaiveDate::from_ymd_opt(year, 5, 30).unwrap(),
                entry_price: 100.0,
                exit_date: NaiveDate::from_ymd_opt(year, 6, 4).unwrap(),
                exit_price: 100.0 + return_pct,
                absolute_return: return_pct,
                return_pct,
                mfe: return_pct.max(0.0),
                mae: return_pct.min(0.0),
                holding_days: 3,
                is_profitable: return_pct > 0.0,
            }
        })
        .collect()
}

// ── Equity linkage ───────────────────────────────────────────────────

proptest! {
    /// equity[0] = 100 and equity[i+1] = equity[i] * (1 + return/100),
    /// exactly, for any trade list.
    #[test]
    fn equity_points_are_multiplicatively_linked(
        returns in prop::collection::vec(arb_return_pct(), 1..40),
    ) {
        let trades = trades_from(&returns);
        let curve = build_equity_curve(&trades);

        prop_assert_eq!(curve.len(), trades.len() + 1);
        prop_assert!((curve[0].equity - 100.0).abs() < 1e-12);
        for (i, point) in curve.iter().skip(1).enumerate() {
            let expected = curve[i].equity * (1.0 + returns[i] / 100.0);
            prop_assert!(
                (point.equity - expected).abs() < 1e-9,
                "point {} = {}, expected {}", i, point.equity, expected
            );
        }
    }
}

// ── Drawdown bounds ──────────────────────────────────────────────────

proptest! {
    /// Max drawdown is non-negative, below 100%, and zero exactly when
    /// equity never declines.
    #[test]
    fn drawdown_is_bounded_and_zero_iff_monotonic(
        returns in prop::collection::vec(arb_return_pct(), 1..40),
    ) {
        let trades = trades_from(&returns);
        let curve = build_equity_curve(&trades);
        let dd = max_drawdown(&curve);

        prop_assert!(dd >= 0.0);
        prop_assert!(dd < 100.0);

        let monotonic = curve.windows(2).all(|w| w[1].equity >= w[0].equity);
        if monotonic {
            prop_assert_eq!(dd, 0.0);
            prop_assert!(max_drawdown_period(&curve).is_none());
        } else {
            prop_assert!(dd > 0.0);
            let period = max_drawdown_period(&curve).unwrap();
            prop_assert!(period.start <= period.end);
        }
    }
}

// ── Aggregate metric invariants ──────────────────────────────────────

proptest! {
    /// Win rate stays in [0, 100]; best >= worst; profit factor is the
    /// sentinel exactly when no trade lost.
    #[test]
    fn aggregate_metrics_respect_their_bounds(
        returns in prop::collection::vec(arb_return_pct(), 1..40),
    ) {
        let trades = trades_from(&returns);
        let curve = build_equity_curve(&trades);
        let m = AggregateMetrics::compute(&trades, &curve).unwrap();

        prop_assert!((0.0..=100.0).contains(&m.win_rate));
        prop_assert!(m.best_event.return_pct >= m.worst_event.return_pct);
        prop_assert!(m.profit_factor >= 0.0);
        prop_assert_eq!(m.winning_trades + m.losing_trades, m.total_trades);

        let has_loss = returns.iter().any(|&r| r < 0.0);
        let has_gain = returns.iter().any(|&r| r > 0.0);
        if !has_loss && has_gain {
            prop_assert_eq!(m.profit_factor, PROFIT_FACTOR_CAP);
        }
        // Expectancy is the mean return by definition.
        prop_assert!((m.expectancy - m.avg_return).abs() < 1e-12);
    }
}
