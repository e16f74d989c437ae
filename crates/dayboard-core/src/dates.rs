use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};

/// The only date shape accepted at the boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono accepts unpadded fields (`2024-1-3`); those are rejected here so the
/// boundary format stays exact.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(CoreError::InvalidDateFormat(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDateFormat(input.to_string()))
}

/// Like [`parse_date`], but an absent or empty input means `today`.
pub fn parse_date_or(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, CoreError> {
    match input.map(str::trim) {
        None | Some("") => Ok(today),
        Some(s) => parse_date(s),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// True when the day after `date` is the first of a month.
#[inline]
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().map_or(true, |next| next.day() == 1)
}

/// Inclusive, ascending range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        if to < from {
            return Err(CoreError::InvalidDateRange(format!(
                "{} is before {}",
                format_date(to),
                format_date(from)
            )));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of days in the range, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2024-01-03", Some(ymd(2024, 1, 3)))]
    #[case("2024-02-29", Some(ymd(2024, 2, 29)))]
    #[case("2023-02-29", None)]
    #[case("2024-1-3", None)]
    #[case("2024/01/03", None)]
    #[case("03-01-2024", None)]
    #[case("2024-01-03T00:00:00", None)]
    #[case("", None)]
    fn test_parse_date(#[case] input: &str, #[case] expected: Option<NaiveDate>) {
        match expected {
            Some(date) => assert_eq!(parse_date(input).unwrap(), date),
            None => assert!(matches!(parse_date(input), Err(CoreError::InvalidDateFormat(_)))),
        }
    }

    #[test]
    fn test_parse_date_or_defaults_to_today() {
        let today = ymd(2024, 5, 1);
        assert_eq!(parse_date_or(None, today).unwrap(), today);
        assert_eq!(parse_date_or(Some(""), today).unwrap(), today);
        assert_eq!(parse_date_or(Some("2024-05-02"), today).unwrap(), ymd(2024, 5, 2));
        assert!(parse_date_or(Some("tomorrow"), today).is_err());
    }

    #[rstest]
    #[case(ymd(2024, 1, 31), true)]
    #[case(ymd(2024, 2, 28), false)]
    #[case(ymd(2024, 2, 29), true)]
    #[case(ymd(2025, 2, 28), true)]
    #[case(ymd(2024, 4, 30), true)]
    #[case(ymd(2024, 12, 31), true)]
    #[case(ymd(2024, 12, 30), false)]
    fn test_is_last_day_of_month(#[case] date: NaiveDate, #[case] expected: bool) {
        assert_eq!(is_last_day_of_month(date), expected);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(ymd(2024, 2, 27), ymd(2024, 3, 1)).unwrap();
        let days: Vec<_> = range.iter().collect();
        assert_eq!(
            days,
            vec![ymd(2024, 2, 27), ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1)]
        );
        assert_eq!(range.len_days(), 4);
    }

    #[test]
    fn test_date_range_single_day_and_reversed() {
        let day = ymd(2024, 1, 1);
        assert_eq!(DateRange::new(day, day).unwrap().iter().count(), 1);
        assert!(matches!(
            DateRange::new(ymd(2024, 1, 2), day),
            Err(CoreError::InvalidDateRange(_))
        ));
    }
}
