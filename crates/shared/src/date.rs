use chrono::{Datelike, Duration, NaiveDate};

/// Monday of the ISO week containing `date`, time-of-day irrelevant since we
/// only deal in calendar dates.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The 7 consecutive dates starting at `week_start`, Monday through Sunday
/// when `week_start` is a Monday.
pub fn week_days(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| week_start + Duration::days(i as i64))
}

/// Stable calendar-date formatting used everywhere a date becomes a string
/// key or JSON value.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
