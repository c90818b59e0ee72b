//! Occurrence timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse an incident occurrence timestamp.
///
/// Accepts ISO 8601 with a `T` or space separator and optional fractional
/// seconds, RFC 3339 with an offset (the local wall-clock time is kept), and a
/// bare date, read as midnight.
///
/// # Examples
/// ```
/// use patrol_data::parse_occurrence_timestamp;
///
/// let parsed = parse_occurrence_timestamp("2024-03-01T19:30:00-05:00");
/// assert_eq!(parsed.map(|ts| ts.to_string()), Some("2024-03-01 19:30:00".into()));
/// ```
#[must_use]
pub fn parse_occurrence_timestamp(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|stamp| stamp.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-03-01T19:30:00", "2024-03-01 19:30:00")]
    #[case("2024-03-01T19:30:00.250", "2024-03-01 19:30:00.250")]
    #[case("2024-03-01 19:30:00", "2024-03-01 19:30:00")]
    #[case(" 2024-03-01 19:30:00.5 ", "2024-03-01 19:30:00.500")]
    #[case("2024-03-01T19:30:00Z", "2024-03-01 19:30:00")]
    #[case("2024-03-01T19:30:00+09:00", "2024-03-01 19:30:00")]
    #[case("2024-03-01", "2024-03-01 00:00:00")]
    fn accepted_formats(#[case] input: &str, #[case] expected: &str) {
        let parsed = parse_occurrence_timestamp(input).expect("timestamp parses");
        assert_eq!(parsed.to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("01/03/2024 19:30")]
    #[case("2024-13-01")]
    #[case("yesterday evening")]
    fn rejected_formats(#[case] input: &str) {
        assert!(parse_occurrence_timestamp(input).is_none());
    }
}
