//! Scheduling of the nightly "move unfinished tasks to today" sweep.
//!
//! The sweep runs at the top of every UTC hour (or half hour) and only
//! touches users whose local clock has just passed midnight. Offsets follow
//! the browser convention: minutes to add to local time to get UTC, so
//! UTC-5 is `300` and UTC+4 is `-240`.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Which users are at local midnight right now, and what "today" is for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSlot {
    /// UTC offset of the users to sweep, in `[-720, 720)`.
    pub offset_minutes: i32,
    /// The local date those users have just entered.
    pub local_date: NaiveDate,
}

impl SweepSlot {
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        let minutes = (utc_now.hour() * 60 + utc_now.minute()) as i32;
        let offset_minutes = if minutes < MINUTES_PER_DAY / 2 {
            minutes
        } else {
            minutes - MINUTES_PER_DAY
        };

        let mut local_date = utc_now.date_naive();
        if offset_minutes < 0 {
            local_date += Duration::days(1);
        }

        Self {
            offset_minutes,
            local_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(utc(2024, 3, 10, 0, 0), 0, ymd(2024, 3, 10))]
    #[case(utc(2024, 3, 10, 5, 0), 300, ymd(2024, 3, 10))]
    #[case(utc(2024, 3, 10, 11, 30), 690, ymd(2024, 3, 10))]
    #[case(utc(2024, 3, 10, 12, 0), -720, ymd(2024, 3, 11))]
    #[case(utc(2024, 3, 10, 20, 0), -240, ymd(2024, 3, 11))]
    #[case(utc(2024, 3, 10, 18, 30), -330, ymd(2024, 3, 11))]
    #[case(utc(2024, 12, 31, 23, 0), -60, ymd(2025, 1, 1))]
    fn test_slot(#[case] now: DateTime<Utc>, #[case] offset: i32, #[case] date: NaiveDate) {
        let slot = SweepSlot::at(now);
        assert_eq!(slot.offset_minutes, offset);
        assert_eq!(slot.local_date, date);
    }

    #[test]
    fn test_local_time_is_midnight_for_the_slot() {
        let now = utc(2024, 7, 1, 20, 0);
        let slot = SweepSlot::at(now);
        let local = now.naive_utc() - Duration::minutes(i64::from(slot.offset_minutes));
        assert_eq!(local.date(), slot.local_date);
        assert_eq!((local.hour(), local.minute()), (0, 0));
    }
}
