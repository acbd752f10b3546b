//! Trade calculator — entry/exit prices, returns, and excursions per valid
//! window.

use crate::domain::EventTrade;
use crate::entry::{PriceField, TradeSpec};
use crate::window::EventWindow;

/// Derive one trade per valid window.
///
/// Entry price comes from the parsed entry spec; exit is always the close
/// of the exit relative day. MFE/MAE measure the best high and worst low
/// over the holding span against the entry price, sign unclamped. The
/// validator has already guaranteed the required bars exist; a window that
/// somehow lacks them is skipped rather than panicking.
pub fn compute_trades(windows: &[&EventWindow], spec: &TradeSpec) -> Vec<EventTrade> {
    windows
        .iter()
        .filter_map(|window| compute_trade(window, spec))
        .collect()
}

fn compute_trade(window: &EventWindow, spec: &TradeSpec) -> Option<EventTrade> {
    let entry_bar = window.bar_at(spec.entry.relative_day)?;
    let exit_bar = window.bar_at(spec.exit_day)?;

    let entry_price = spec.entry.field.of(entry_bar);
    let exit_price = PriceField::Close.of(exit_bar);

    let absolute_return = exit_price - entry_price;
    let return_pct = absolute_return / entry_price * 100.0;

    let holding_span: Vec<&_> = window
        .bars
        .iter()
        .filter(|b| b.relative_day >= spec.entry.relative_day && b.relative_day <= spec.exit_day)
        .collect();
    let best_high = holding_span
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let worst_low = holding_span
        .iter()
        .map(|b| b.low)
        .fold(f64::INFINITY, f64::min);
    let mfe = (best_high - entry_price) / entry_price * 100.0;
    let mae = (worst_low - entry_price) / entry_price * 100.0;

    Some(EventTrade {
        event_name: window.event.name.clone(),
        event_date: window.event.date,
        year: window.event.year,
        category: window.event.category.clone(),
        entry_date: entry_bar.date,
        entry_price,
        exit_date: exit_bar.date,
        exit_price,
        absolute_return,
        return_pct,
        mfe,
        mae,
        holding_days: spec.exit_day - spec.entry.relative_day,
        // A flat trade does not count as profitable.
        is_profitable: return_pct > 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventOccurrence;
    use crate::window::WindowBar;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(relative_day: i32, open: f64, high: f64, low: f64, close: f64) -> WindowBar {
        WindowBar {
            relative_day,
            date: ymd(2024, 1, 8) + chrono::Duration::days(relative_day as i64),
            open,
            high,
            low,
            close,
            volume: 1_000,
            return_pct: 0.0,
            is_event_day: relative_day == 0,
        }
    }

    fn window() -> EventWindow {
        EventWindow {
            event: EventOccurrence {
                name: "Budget Day".into(),
                date: ymd(2024, 1, 8),
                year: 2024,
                category: "Fiscal".into(),
                country: "IN".into(),
            },
            t0_index: 5,
            bars: vec![
                bar(-2, 98.0, 99.0, 97.0, 98.5),
                bar(-1, 99.0, 100.5, 98.5, 100.0),
                bar(0, 101.0, 103.0, 100.0, 102.0),
                bar(1, 102.0, 106.0, 101.5, 105.0),
                bar(2, 105.0, 105.5, 102.5, 104.0),
            ],
        }
    }

    #[test]
    fn entry_and_exit_prices_follow_the_trade_spec() {
        let w = window();
        let spec = TradeSpec::new("T-1_CLOSE", 2);
        let trades = compute_trades(&[&w], &spec);
        assert_eq!(trades.len(), 1);

        let t = &trades[0];
        assert_eq!(t.entry_price, 100.0);
        assert_eq!(t.entry_date, ymd(2024, 1, 7));
        assert_eq!(t.exit_price, 104.0);
        assert_eq!(t.exit_date, ymd(2024, 1, 10));
        assert!((t.absolute_return - 4.0).abs() < 1e-10);
        assert!((t.return_pct - 4.0).abs() < 1e-10);
        assert_eq!(t.holding_days, 3);
        assert!(t.is_profitable);
    }

    #[test]
    fn entry_can_use_the_open_of_t0() {
        let w = window();
        let spec = TradeSpec::new("T0_OPEN", 1);
        let t = &compute_trades(&[&w], &spec)[0];
        assert_eq!(t.entry_price, 101.0);
        assert_eq!(t.exit_price, 105.0);
        assert_eq!(t.holding_days, 1);
    }

    #[test]
    fn excursions_cover_the_holding_span_only() {
        let w = window();
        let spec = TradeSpec::new("T-1_CLOSE", 2);
        let t = &compute_trades(&[&w], &spec)[0];
        // Best high in [-1, 2] is 106.0; worst low is 98.5. Entry is 100.0.
        assert!((t.mfe - 6.0).abs() < 1e-10);
        assert!((t.mae - (-1.5)).abs() < 1e-10);
    }

    #[test]
    fn mae_keeps_its_sign_when_price_never_dips() {
        let mut w = window();
        for b in &mut w.bars {
            b.low = 120.0;
            b.high = 130.0;
        }
        let spec = TradeSpec::new("T-1_CLOSE", 2);
        let t = &compute_trades(&[&w], &spec)[0];
        // Lows all above entry: MAE is positive, not clamped to zero.
        assert!(t.mae > 0.0);
    }

    #[test]
    fn flat_trade_is_not_profitable() {
        let mut w = window();
        // Exit close equals entry close.
        w.bars[4].close = 100.0;
        let spec = TradeSpec::new("T-1_CLOSE", 2);
        let t = &compute_trades(&[&w], &spec)[0];
        assert_eq!(t.return_pct, 0.0);
        assert!(!t.is_profitable);
    }
}
