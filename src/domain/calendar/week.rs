//! Week arithmetic.
//!
//! Weeks start on Sunday. All dates are UTC calendar dates; callers convert
//! instants with `Timestamp::date()`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identity of one Sunday-anchored week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekInfo {
    pub week_start: NaiveDate,
    pub week_number: u32,
    pub year: i32,
}

/// The most recent Sunday at or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The Saturday closing the week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Week number and year come from the Monday after the anchoring Sunday,
/// so a Sunday and the Saturday after it always agree.
pub fn week_info(date: NaiveDate) -> WeekInfo {
    let start = week_start(date);
    let iso = (start + Duration::days(1)).iso_week();
    WeekInfo {
        week_start: start,
        week_number: iso.week(),
        year: iso.year(),
    }
}

/// `"Dec 22 - Dec 28, 2024"`.
pub fn format_week_display(week_start_date: NaiveDate) -> String {
    let end = week_end(week_start_date);
    format!(
        "{} - {}",
        week_start_date.format("%b %-d"),
        end.format("%b %-d, %Y")
    )
}

/// `count` consecutive weeks, oldest first, the last one containing `today`.
pub fn past_weeks(today: NaiveDate, count: usize) -> Vec<WeekInfo> {
    let current = week_start(today);
    (0..count)
        .rev()
        .map(|weeks_ago| week_info(current - Duration::weeks(weeks_ago as i64)))
        .collect()
}

pub fn is_current_week(date: NaiveDate, today: NaiveDate) -> bool {
    week_start(date) == week_start(today)
}

/// Whole weeks from the week of `from` to the week of `to`. Negative when
/// `to` is earlier.
pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (week_start(to) - week_start(from)).num_days() / 7
}

/// Whole days left before Saturday; 0 on Saturday itself.
pub fn days_remaining_in_week(today: NaiveDate) -> i64 {
    (week_end(today) - today).num_days()
}

/// Whole hours until the week closes at the following Sunday 00:00 UTC.
pub fn hours_remaining_in_week(now: DateTime<Utc>) -> i64 {
    let next_start = week_start(now.date_naive()) + Duration::days(7);
    let close = next_start.and_time(chrono::NaiveTime::MIN).and_utc();
    (close - now).num_hours()
}

pub fn is_streak_at_risk(today: NaiveDate) -> bool {
    days_remaining_in_week(today) <= 1
}

/// Zero-padded `mm:ss`. Minutes keep counting past 59.
pub fn format_time_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_is_sunday_at_or_before() {
        assert_eq!(week_start(date(2024, 12, 22)), date(2024, 12, 22));
        assert_eq!(week_start(date(2024, 12, 25)), date(2024, 12, 22));
        assert_eq!(week_start(date(2024, 12, 28)), date(2024, 12, 22));
        assert_eq!(week_start(date(2024, 12, 29)), date(2024, 12, 29));
    }

    #[test]
    fn week_start_crosses_month_and_year() {
        assert_eq!(week_start(date(2025, 1, 2)), date(2024, 12, 29));
        assert_eq!(week_start(date(2024, 3, 1)).weekday(), Weekday::Sun);
    }

    #[test]
    fn week_end_is_saturday() {
        assert_eq!(week_end(date(2024, 12, 22)), date(2024, 12, 28));
        assert_eq!(week_end(date(2024, 12, 28)), date(2024, 12, 28));
    }

    #[test]
    fn week_info_is_stable_across_the_week() {
        let sunday = week_info(date(2024, 12, 22));
        let saturday = week_info(date(2024, 12, 28));

        assert_eq!(sunday, saturday);
        assert_eq!(sunday.week_number, 52);
        assert_eq!(sunday.year, 2024);
    }

    #[test]
    fn week_info_uses_iso_week_year_at_year_boundary() {
        let info = week_info(date(2024, 12, 31));
        assert_eq!(info.week_start, date(2024, 12, 29));
        assert_eq!(info.week_number, 1);
        assert_eq!(info.year, 2025);
    }

    #[test]
    fn format_week_display_matches_card_text() {
        assert_eq!(format_week_display(date(2024, 12, 22)), "Dec 22 - Dec 28, 2024");
        assert_eq!(format_week_display(date(2024, 12, 29)), "Dec 29 - Jan 4, 2025");
    }

    #[test]
    fn past_weeks_is_oldest_first_and_ends_at_current_week() {
        let weeks = past_weeks(date(2024, 12, 25), 3);

        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0].week_start, date(2024, 12, 8));
        assert_eq!(weeks[1].week_start, date(2024, 12, 15));
        assert_eq!(weeks[2].week_start, date(2024, 12, 22));
    }

    #[test]
    fn past_weeks_zero_is_empty() {
        assert!(past_weeks(date(2024, 12, 25), 0).is_empty());
    }

    #[test]
    fn is_current_week_compares_week_starts() {
        let today = date(2024, 12, 25);
        assert!(is_current_week(date(2024, 12, 22), today));
        assert!(is_current_week(date(2024, 12, 28), today));
        assert!(!is_current_week(date(2024, 12, 21), today));
        assert!(!is_current_week(date(2024, 12, 29), today));
    }

    #[test]
    fn weeks_between_counts_whole_weeks() {
        assert_eq!(weeks_between(date(2024, 12, 1), date(2024, 12, 25)), 3);
        assert_eq!(weeks_between(date(2024, 12, 25), date(2024, 12, 1)), -3);
        assert_eq!(weeks_between(date(2024, 12, 22), date(2024, 12, 28)), 0);
    }

    #[test]
    fn days_remaining_and_risk() {
        assert_eq!(days_remaining_in_week(date(2024, 12, 22)), 6);
        assert_eq!(days_remaining_in_week(date(2024, 12, 27)), 1);
        assert_eq!(days_remaining_in_week(date(2024, 12, 28)), 0);

        assert!(!is_streak_at_risk(date(2024, 12, 26)));
        assert!(is_streak_at_risk(date(2024, 12, 27)));
        assert!(is_streak_at_risk(date(2024, 12, 28)));
    }

    #[test]
    fn hours_remaining_counts_to_sunday_midnight() {
        let late_saturday = Utc.with_ymd_and_hms(2024, 12, 28, 22, 0, 0).unwrap();
        assert_eq!(hours_remaining_in_week(late_saturday), 2);

        let sunday_morning = Utc.with_ymd_and_hms(2024, 12, 22, 0, 0, 0).unwrap();
        assert_eq!(hours_remaining_in_week(sunday_morning), 168);
    }

    #[test]
    fn format_time_elapsed_pads_and_does_not_wrap() {
        assert_eq!(format_time_elapsed(0), "00:00");
        assert_eq!(format_time_elapsed(65), "01:05");
        assert_eq!(format_time_elapsed(3_725), "62:05");
    }
}
