use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalendarError {
    #[error("invalid weekday index: {0} (expected 0-6, Sunday = 0)")]
    InvalidWeekday(u8),

    #[error("unrecognised weekday: {0}")]
    UnknownWeekday(String),

    #[error("{0} is outside the playable range")]
    OutOfRange(NaiveDate),
}

//
// ─── DATE RANGE ───────────────────────────────────────────────────────────────
//

/// Earliest date a round may show.
pub const FIRST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("1900-01-01 is a valid date"),
};

/// Latest date a round may show.
pub const LAST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2100, 12, 31) {
    Some(date) => date,
    None => panic!("2100-12-31 is a valid date"),
};

/// Weekdays in display order, Sunday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Returns true when `date` lies inside the playable range.
#[must_use]
pub fn in_range(date: NaiveDate) -> bool {
    (FIRST_DATE..=LAST_DATE).contains(&date)
}

//
// ─── WEEKDAYS ─────────────────────────────────────────────────────────────────
//

/// Weekday index of a date, Sunday = 0 through Saturday = 6.
#[must_use]
pub fn weekday_of(date: NaiveDate) -> u8 {
    weekday_index(date.weekday())
}

#[must_use]
pub fn weekday_index(day: Weekday) -> u8 {
    // num_days_from_sunday is always 0..=6
    u8::try_from(day.num_days_from_sunday()).unwrap_or(0)
}

/// Converts a Sunday-based index back into a weekday.
///
/// # Errors
///
/// Returns `CalendarError::InvalidWeekday` for values above 6.
pub fn weekday_from_index(index: u8) -> Result<Weekday, CalendarError> {
    WEEKDAYS
        .get(usize::from(index))
        .copied()
        .ok_or(CalendarError::InvalidWeekday(index))
}

#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Parses a player's weekday answer: a digit (0 = Sunday) or an unambiguous
/// prefix of the English name, case-insensitive.
///
/// # Errors
///
/// Returns `CalendarError` when the input matches no weekday or several.
pub fn parse_weekday(raw: &str) -> Result<Weekday, CalendarError> {
    let input = raw.trim().to_lowercase();
    if let Ok(index) = input.parse::<u8>() {
        return weekday_from_index(index);
    }
    if input.len() < 2 {
        return Err(CalendarError::UnknownWeekday(raw.to_string()));
    }

    let mut matches = WEEKDAYS
        .iter()
        .filter(|day| weekday_name(**day).to_lowercase().starts_with(&input));
    match (matches.next(), matches.next()) {
        (Some(day), None) => Ok(*day),
        _ => Err(CalendarError::UnknownWeekday(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Zeller's congruence, independent of chrono's weekday tables.
    fn zeller_sunday_index(date: NaiveDate) -> u8 {
        let (mut y, mut m) = (date.year(), date.month() as i32);
        if m < 3 {
            m += 12;
            y -= 1;
        }
        let q = date.day() as i32;
        let k = y.rem_euclid(100);
        let j = y.div_euclid(100);
        let h = (q + (13 * (m + 1)) / 5 + k + k / 4 + j / 4 + 5 * j).rem_euclid(7);
        // h: 0 = Saturday, 1 = Sunday, ...
        ((h + 6) % 7) as u8
    }

    #[test]
    fn weekday_matches_reference_over_entire_range() {
        let mut date = FIRST_DATE;
        while date <= LAST_DATE {
            assert_eq!(weekday_of(date), zeller_sunday_index(date), "{date}");
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn known_dates() {
        // 1900-01-01 was a Monday, 2000-01-01 a Saturday, 2100-12-31 a Friday.
        assert_eq!(weekday_of(FIRST_DATE), 1);
        assert_eq!(weekday_of(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()), 6);
        assert_eq!(weekday_of(LAST_DATE), 5);
    }

    #[test]
    fn index_round_trips_and_rejects_seven() {
        for (i, day) in WEEKDAYS.iter().enumerate() {
            assert_eq!(weekday_from_index(i as u8).unwrap(), *day);
        }
        assert_eq!(
            weekday_from_index(7).unwrap_err(),
            CalendarError::InvalidWeekday(7)
        );
    }

    #[test]
    fn parses_names_prefixes_and_digits() {
        assert_eq!(parse_weekday("0").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday(" Wed ").unwrap(), Weekday::Wed);
        assert_eq!(parse_weekday("thursday").unwrap(), Weekday::Thu);
        assert!(parse_weekday("t").is_err());
        assert!(parse_weekday("s").is_err());
        assert!(parse_weekday("funday").is_err());
    }
}
