//! EventOccurrence — one recurrence of a named calendar event.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single recurrence of a named event (e.g. "Union Budget Day" in 2019).
///
/// Supplied by the event-occurrence provider; treated as immutable input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventOccurrence {
    pub name: String,
    pub date: NaiveDate,
    pub year: i32,
    pub category: String,
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrence_serialization_roundtrip() {
        let e = EventOccurrence {
            name: "Union Budget Day".into(),
            date: NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(),
            year: 2019,
            category: "Fiscal".into(),
            country: "IN".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let deser: EventOccurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(e, deser);
    }
}
