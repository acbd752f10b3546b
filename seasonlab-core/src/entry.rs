//! Entry/exit specification and the `T{offset}_{FIELD}` wire grammar.
//!
//! The dashboard sends entry points as strings like `T-1_CLOSE` ("close of
//! the session one trading day before the event") or `T0_OPEN`. The string
//! is parsed exactly once at the request boundary into an [`EntrySpec`];
//! everything downstream works with the parsed form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::window::WindowBar;

/// Which OHLC price a trade enters at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl PriceField {
    /// The corresponding price from a window bar.
    pub fn of(self, bar: &WindowBar) -> f64 {
        match self {
            PriceField::Open => bar.open,
            PriceField::High => bar.high,
            PriceField::Low => bar.low,
            PriceField::Close => bar.close,
        }
    }

    fn wire_name(self) -> &'static str {
        match self {
            PriceField::Open => "OPEN",
            PriceField::High => "HIGH",
            PriceField::Low => "LOW",
            PriceField::Close => "CLOSE",
        }
    }
}

/// Parsed trade entry point: a relative day and the price field to enter at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySpec {
    pub relative_day: i32,
    pub field: PriceField,
}

impl EntrySpec {
    /// Fallback for unparseable wire strings: close of the session one
    /// trading day before the event.
    pub const DEFAULT: EntrySpec = EntrySpec {
        relative_day: -1,
        field: PriceField::Close,
    };

    /// Parse a `T{offset}_{FIELD}` wire string (e.g. `T-1_CLOSE`, `T0_OPEN`).
    ///
    /// Unparseable strings — missing `T` prefix, non-numeric offset, unknown
    /// field — fall back to [`EntrySpec::DEFAULT`] rather than erroring, to
    /// keep wire compatibility with the dashboard's historical behavior.
    pub fn parse(wire: &str) -> EntrySpec {
        let Some(rest) = wire.trim().strip_prefix('T') else {
            return Self::DEFAULT;
        };
        let Some((offset, field)) = rest.split_once('_') else {
            return Self::DEFAULT;
        };
        let Ok(relative_day) = offset.parse::<i32>() else {
            return Self::DEFAULT;
        };
        let field = match field.to_ascii_uppercase().as_str() {
            "OPEN" => PriceField::Open,
            "HIGH" => PriceField::High,
            "LOW" => PriceField::Low,
            "CLOSE" => PriceField::Close,
            _ => return Self::DEFAULT,
        };
        EntrySpec {
            relative_day,
            field,
        }
    }
}

impl fmt::Display for EntrySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}_{}", self.relative_day, self.field.wire_name())
    }
}

/// Full trade specification: parsed entry, the original wire string (kept
/// for diagnostics), and the exit relative day. Exit is always at close.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSpec {
    pub entry: EntrySpec,
    pub entry_type: String,
    pub exit_day: i32,
}

impl TradeSpec {
    pub fn new(entry_type: &str, days_after: i32) -> Self {
        Self {
            entry: EntrySpec::parse(entry_type),
            entry_type: entry_type.to_string(),
            exit_day: days_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_offset_close() {
        let spec = EntrySpec::parse("T-1_CLOSE");
        assert_eq!(spec.relative_day, -1);
        assert_eq!(spec.field, PriceField::Close);
    }

    #[test]
    fn parses_zero_offset_open() {
        let spec = EntrySpec::parse("T0_OPEN");
        assert_eq!(spec.relative_day, 0);
        assert_eq!(spec.field, PriceField::Open);
    }

    #[test]
    fn parses_explicit_plus_sign() {
        let spec = EntrySpec::parse("T+2_LOW");
        assert_eq!(spec.relative_day, 2);
        assert_eq!(spec.field, PriceField::Low);
    }

    #[test]
    fn field_is_case_insensitive() {
        let spec = EntrySpec::parse("T0_close");
        assert_eq!(spec.field, PriceField::Close);
    }

    #[test]
    fn unparseable_strings_fall_back_to_default() {
        for wire in ["", "garbage", "T_CLOSE", "Tx_OPEN", "T1_BANANA", "1_CLOSE"] {
            assert_eq!(EntrySpec::parse(wire), EntrySpec::DEFAULT, "wire: {wire}");
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        let spec = EntrySpec {
            relative_day: -3,
            field: PriceField::High,
        };
        assert_eq!(EntrySpec::parse(&spec.to_string()), spec);
    }

    #[test]
    fn trade_spec_keeps_the_wire_string() {
        let spec = TradeSpec::new("T-1_CLOSE", 5);
        assert_eq!(spec.entry_type, "T-1_CLOSE");
        assert_eq!(spec.exit_day, 5);
        assert_eq!(spec.entry.relative_day, -1);
    }
}
