use chrono::{DateTime, NaiveDate, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// Long US form, e.g. "January 1, 2000".
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Two decimal places, e.g. "1.23".
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.2}")
}

/// Countdown display, e.g. 65 -> "1:05".
#[must_use]
pub fn format_countdown(seconds_left: u32) -> String {
    format!("{}:{:02}", seconds_left / 60, seconds_left % 60)
}
