//! Publish-date matching.

use crate::error::PublishDateError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc, Weekday};

/// Layout of the pubDate after the `<weekday>, ` prefix
///
/// `%d` also accepts a single-digit day. The offset is literal text: feeds are
/// expected in UTC and any other offset fails to parse.
pub const PUBLISH_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S +0000";

/// Target date layout for command line input
pub const TARGET_DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of checking an item's pubDate against the target date
#[derive(Debug, Clone, PartialEq)]
pub enum DateCheck {
    /// Published on the target date
    Matches,
    /// Published on another date
    Mismatch {
        /// Calendar date of the pubDate
        published: NaiveDate,
    },
    /// The pubDate does not follow `Mon, 2 Jan 2006 15:04:05 +0000`
    Unparseable(PublishDateError),
}

/// Selects items published on a single calendar date
#[derive(Debug, Clone, Copy)]
pub struct DateFilter {
    target: NaiveDate,
}

impl DateFilter {
    /// Create a filter for `target`
    pub fn new(target: NaiveDate) -> Self {
        Self { target }
    }

    /// The date items must be published on
    pub fn target(&self) -> NaiveDate {
        self.target
    }

    /// Check a raw pubDate against the target date (UTC calendar date)
    pub fn evaluate(&self, publish_date: &str) -> DateCheck {
        match parse_publish_date(publish_date) {
            Ok(published) => {
                let published = published.date_naive();
                if published == self.target {
                    DateCheck::Matches
                } else {
                    DateCheck::Mismatch { published }
                }
            }
            Err(e) => DateCheck::Unparseable(e),
        }
    }
}

/// Parse a pubDate such as `Thu, 11 Jan 2024 21:00:00 +0000`
///
/// Weekday and month must be three-letter names. The weekday is only checked
/// for being a weekday name, not for agreeing with the date.
pub fn parse_publish_date(value: &str) -> Result<DateTime<Utc>, PublishDateError> {
    let (weekday, rest) = value
        .trim()
        .split_once(", ")
        .ok_or(PublishDateError::MissingWeekday)?;

    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return Err(PublishDateError::InvalidWeekday(weekday.to_string()));
    }

    // %b would also take "January"
    if let Some(month) = rest.split(' ').nth(1)
        && month.len() != 3
    {
        return Err(PublishDateError::InvalidMonth(month.to_string()));
    }

    let naive = NaiveDateTime::parse_from_str(rest, PUBLISH_DATE_FORMAT)?;
    Ok(naive.and_utc())
}

/// Parse a `YYYY-MM-DD` target date
pub fn parse_target_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, TARGET_DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_matching_date() {
        let filter = DateFilter::new(date(2024, 1, 11));
        assert_eq!(
            filter.evaluate("Thu, 11 Jan 2024 21:00:00 +0000"),
            DateCheck::Matches
        );
    }

    #[test]
    fn test_mismatching_date() {
        let filter = DateFilter::new(date(2024, 1, 12));
        assert_eq!(
            filter.evaluate("Thu, 11 Jan 2024 21:00:00 +0000"),
            DateCheck::Mismatch {
                published: date(2024, 1, 11)
            }
        );
    }

    #[test]
    fn test_single_digit_day() {
        let filter = DateFilter::new(date(2024, 1, 2));
        assert_eq!(
            filter.evaluate("Tue, 2 Jan 2024 15:04:05 +0000"),
            DateCheck::Matches
        );
        assert_eq!(
            filter.evaluate("Tue, 02 Jan 2024 15:04:05 +0000"),
            DateCheck::Matches
        );
    }

    #[test]
    fn test_non_utc_offset_is_unparseable() {
        let filter = DateFilter::new(date(2024, 1, 11));
        for raw in [
            "Thu, 11 Jan 2024 23:30:00 -0500",
            "Thu, 11 Jan 2024 21:00:00 +0100",
            "Thu, 11 Jan 2024 21:00:00 +00:00",
        ] {
            assert!(
                matches!(
                    filter.evaluate(raw),
                    DateCheck::Unparseable(PublishDateError::Timestamp(_))
                ),
                "'{}' should not parse",
                raw
            );
        }
    }

    #[test]
    fn test_weekday_not_checked_against_date() {
        // 11 Jan 2024 is a Thursday
        let filter = DateFilter::new(date(2024, 1, 11));
        assert_eq!(
            filter.evaluate("Fri, 11 Jan 2024 21:00:00 +0000"),
            DateCheck::Matches
        );
        assert_eq!(
            filter.evaluate("mon, 11 Jan 2024 21:00:00 +0000"),
            DateCheck::Matches
        );
    }

    #[test]
    fn test_full_names_rejected() {
        let filter = DateFilter::new(date(2024, 1, 11));
        assert_eq!(
            filter.evaluate("Thursday, 11 Jan 2024 21:00:00 +0000"),
            DateCheck::Unparseable(PublishDateError::InvalidWeekday("Thursday".to_string()))
        );
        assert_eq!(
            filter.evaluate("Thu, 11 January 2024 21:00:00 +0000"),
            DateCheck::Unparseable(PublishDateError::InvalidMonth("January".to_string()))
        );
        assert_eq!(
            filter.evaluate("Xyz, 11 Jan 2024 21:00:00 +0000"),
            DateCheck::Unparseable(PublishDateError::InvalidWeekday("Xyz".to_string()))
        );
    }

    #[test]
    fn test_parsed_as_utc() {
        let parsed = parse_publish_date("Thu, 11 Jan 2024 21:00:00 +0000").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-11T21:00:00+00:00");
    }

    #[test]
    fn test_unparseable_dates() {
        let filter = DateFilter::new(date(2024, 1, 11));
        for raw in [
            "",
            "2024-01-11T21:00:00Z",
            "Thu, 11 Jan 2024 21:00:00 GMT",
            "Thu, 11 Jan 2024",
            "11 Jan 2024 21:00:00 +0000",
            "Thu, 32 Jan 2024 21:00:00 +0000",
        ] {
            assert!(
                matches!(filter.evaluate(raw), DateCheck::Unparseable(_)),
                "'{}' should not parse",
                raw
            );
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let filter = DateFilter::new(date(2024, 1, 11));
        assert_eq!(
            filter.evaluate("\n    Thu, 11 Jan 2024 21:00:00 +0000\n"),
            DateCheck::Matches
        );
    }

    #[test]
    fn test_parse_target_date() {
        assert_eq!(parse_target_date("2024-01-11").unwrap(), date(2024, 1, 11));
        assert!(parse_target_date("11/01/2024").is_err());
        assert!(parse_target_date("2024-13-01").is_err());
    }
}
