//! Human readable timestamps for popups.

use chrono::{DateTime, Utc};

use crate::normalize::Timestamp;

/// Short UTC date and time, e.g. `11/14/2023, 10:13:20 PM`.
pub fn short_datetime(timestamp: &Timestamp) -> String {
    format_with(timestamp, |instant| {
        instant.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    })
}

/// Full date string, e.g. `Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)`.
pub fn full_datetime(timestamp: &Timestamp) -> String {
    format_with(timestamp, |instant| {
        instant
            .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            .to_string()
    })
}

fn format_with(timestamp: &Timestamp, format: impl Fn(&DateTime<Utc>) -> String) -> String {
    match timestamp {
        Timestamp::Valid(instant) => format(instant),
        invalid => invalid.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_epoch_millis(Some(&json!(millis)))
    }

    #[test]
    fn formats_valid() {
        let timestamp = at(1_700_000_000_000);
        assert_eq!(short_datetime(&timestamp), "11/14/2023, 10:13:20 PM");
        assert_eq!(
            full_datetime(&timestamp),
            "Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)"
        );

        assert_eq!(short_datetime(&at(0)), "1/1/1970, 12:00:00 AM");
    }

    #[test]
    fn falls_back_to_literal() {
        let garbage = Timestamp::from_epoch_millis(Some(&json!("soon")));
        assert_eq!(short_datetime(&garbage), "soon");
        assert_eq!(full_datetime(&Timestamp::Invalid(None)), "Invalid Date");
    }
}
