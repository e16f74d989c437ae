use crate::dates::is_last_day_of_month;
use crate::models::RecurrenceKind;
use chrono::{Datelike, Month, NaiveDate};

/// Decide whether `candidate` is an occurrence of a task anchored on `anchor`.
///
/// Nothing occurs before its anchor. Monthly tasks anchored on the last day
/// of a month recur on every month's last day; yearly tasks anchored on a
/// leap day recur on the last day of February. A non-repeating task only
/// "occurs" on its own anchor date.
pub fn matches(anchor: NaiveDate, candidate: NaiveDate, kind: RecurrenceKind) -> bool {
    if candidate < anchor {
        return false;
    }

    match kind {
        RecurrenceKind::None => candidate == anchor,
        RecurrenceKind::Day => true,
        RecurrenceKind::Week => candidate.weekday() == anchor.weekday(),
        RecurrenceKind::Month => {
            candidate.day() == anchor.day()
                || (is_last_day_of_month(anchor) && is_last_day_of_month(candidate))
        }
        RecurrenceKind::Year => {
            if candidate.month() != anchor.month() {
                return false;
            }
            if is_leap_day(anchor) {
                return is_last_day_of_month(candidate);
            }
            candidate.day() == anchor.day()
        }
    }
}

#[inline]
fn is_leap_day(date: NaiveDate) -> bool {
    date.month() == Month::February.number_from_month() && date.day() == 29
}

/// Occurrences of a task inside `[from, to]`, ascending.
pub fn occurrences_between(
    anchor: NaiveDate,
    kind: RecurrenceKind,
    from: NaiveDate,
    to: NaiveDate,
) -> impl Iterator<Item = NaiveDate> {
    from.max(anchor)
        .iter_days()
        .take_while(move |d| *d <= to)
        .filter(move |d| matches(anchor, *d, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    // daily
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 10), RecurrenceKind::Day, true)]
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 9), RecurrenceKind::Day, false)]
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 11), RecurrenceKind::Day, true)]
    #[case(ymd(2024, 5, 10), ymd(2031, 1, 1), RecurrenceKind::Day, true)]
    // weekly
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 17), RecurrenceKind::Week, true)]
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 11), RecurrenceKind::Week, false)]
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 3), RecurrenceKind::Week, false)]
    // monthly
    #[case(ymd(2020, 8, 3), ymd(2020, 8, 3), RecurrenceKind::Month, true)]
    #[case(ymd(2020, 8, 3), ymd(2020, 9, 3), RecurrenceKind::Month, true)]
    #[case(ymd(2020, 8, 3), ymd(2020, 9, 4), RecurrenceKind::Month, false)]
    #[case(ymd(2020, 1, 31), ymd(2020, 2, 29), RecurrenceKind::Month, true)]
    #[case(ymd(2020, 1, 31), ymd(2020, 2, 28), RecurrenceKind::Month, false)]
    #[case(ymd(2020, 1, 31), ymd(2020, 4, 30), RecurrenceKind::Month, true)]
    #[case(ymd(2020, 2, 29), ymd(2021, 2, 28), RecurrenceKind::Month, true)]
    #[case(ymd(2020, 4, 30), ymd(2020, 1, 31), RecurrenceKind::Month, false)]
    #[case(ymd(2024, 1, 31), ymd(2024, 2, 29), RecurrenceKind::Month, true)]
    #[case(ymd(2024, 1, 31), ymd(2024, 2, 28), RecurrenceKind::Month, false)]
    #[case(ymd(2024, 1, 30), ymd(2024, 2, 29), RecurrenceKind::Month, false)]
    #[case(ymd(2024, 1, 30), ymd(2024, 3, 30), RecurrenceKind::Month, true)]
    // yearly
    #[case(ymd(2020, 1, 31), ymd(2021, 1, 31), RecurrenceKind::Year, true)]
    #[case(ymd(2020, 2, 29), ymd(2021, 2, 28), RecurrenceKind::Year, true)]
    #[case(ymd(2020, 4, 30), ymd(2021, 4, 30), RecurrenceKind::Year, true)]
    #[case(ymd(2020, 1, 31), ymd(2021, 3, 31), RecurrenceKind::Year, false)]
    #[case(ymd(2020, 1, 31), ymd(2021, 4, 30), RecurrenceKind::Year, false)]
    #[case(ymd(2024, 2, 29), ymd(2025, 2, 28), RecurrenceKind::Year, true)]
    #[case(ymd(2024, 2, 29), ymd(2025, 3, 1), RecurrenceKind::Year, false)]
    #[case(ymd(2024, 2, 29), ymd(2028, 2, 29), RecurrenceKind::Year, true)]
    #[case(ymd(2024, 2, 29), ymd(2028, 2, 28), RecurrenceKind::Year, false)]
    #[case(ymd(2024, 2, 28), ymd(2025, 2, 28), RecurrenceKind::Year, true)]
    #[case(ymd(2023, 2, 28), ymd(2024, 2, 29), RecurrenceKind::Year, false)]
    // single
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 10), RecurrenceKind::None, true)]
    #[case(ymd(2024, 5, 10), ymd(2024, 5, 11), RecurrenceKind::None, false)]
    fn test_matches_calendar_fixtures(
        #[case] anchor: NaiveDate,
        #[case] candidate: NaiveDate,
        #[case] kind: RecurrenceKind,
        #[case] expected: bool,
    ) {
        assert_eq!(matches(anchor, candidate, kind), expected);
    }

    #[test]
    fn test_weekly_occurrences_in_window() {
        // 2024-01-03 is a Wednesday
        let found: Vec<_> = occurrences_between(
            ymd(2024, 1, 3),
            RecurrenceKind::Week,
            ymd(2024, 1, 1),
            ymd(2024, 1, 20),
        )
        .collect();
        assert_eq!(found, vec![ymd(2024, 1, 3), ymd(2024, 1, 10), ymd(2024, 1, 17)]);
    }

    #[test]
    fn test_month_end_occurrences_over_a_year() {
        let found: Vec<_> = occurrences_between(
            ymd(2024, 1, 31),
            RecurrenceKind::Month,
            ymd(2024, 1, 1),
            ymd(2024, 12, 31),
        )
        .collect();
        assert_eq!(found.len(), 12);
        assert!(found.iter().all(|d| is_last_day_of_month(*d)));
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..365 * 60).prop_map(|offset| ymd(1990, 1, 1) + Duration::days(offset))
    }

    fn any_kind() -> impl Strategy<Value = RecurrenceKind> {
        prop::sample::select(vec![
            RecurrenceKind::None,
            RecurrenceKind::Day,
            RecurrenceKind::Week,
            RecurrenceKind::Month,
            RecurrenceKind::Year,
        ])
    }

    proptest! {
        #[test]
        fn prop_every_kind_matches_its_anchor(date in any_date(), kind in any_kind()) {
            prop_assert!(matches(date, date, kind));
        }

        #[test]
        fn prop_weekly_matches_exactly_every_seventh_day(
            anchor in any_date(),
            weeks in 0i64..520,
            shift in 1i64..7,
        ) {
            let on = anchor + Duration::days(7 * weeks);
            prop_assert!(matches(anchor, on, RecurrenceKind::Week));
            prop_assert!(!matches(anchor, on + Duration::days(shift), RecurrenceKind::Week));
        }

        #[test]
        fn prop_nothing_occurs_before_anchor(
            anchor in any_date(),
            back in 1i64..4000,
            kind in any_kind(),
        ) {
            prop_assert!(!matches(anchor, anchor - Duration::days(back), kind));
        }
    }
}
