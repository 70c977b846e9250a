//! Worked examples of the Doomsday method taught on the tutorial screen.

use chrono::{Datelike, NaiveDate, Weekday};
use dayguess_core::model::CalendarError;
use dayguess_core::model::calendar::{in_range, weekday_from_index};

/// Example used when the player has not picked a date.
#[must_use]
pub fn example_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 8, 22).unwrap_or_default()
}

/// Every intermediate number of the mental calculation for one date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoomsdayWalkthrough {
    pub date: NaiveDate,
    pub anchor: Weekday,
    pub year_in_century: u32,
    pub twelves: u32,
    pub remainder: u32,
    pub fours: u32,
    pub sum: u32,
    pub doomsday: Weekday,
    /// The month's doomsday date closest to remember.
    pub month_doomsday: NaiveDate,
    pub offset_days: i64,
    pub answer: Weekday,
}

/// Century anchor day as a Sunday-based index.
#[must_use]
pub fn century_anchor(year: i32) -> u8 {
    let century = year.div_euclid(100);
    // 1900s Wednesday, 2000s Tuesday, 2100s Sunday, 1800s Friday
    (5 * century.rem_euclid(4) + 2).rem_euclid(7) as u8
}

/// Day of the month that falls on the doomsday in `month` of `year`.
#[must_use]
pub fn month_doomsday_day(year: i32, month: u32) -> u32 {
    let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
    match month {
        1 if leap => 4,
        1 => 3,
        2 if leap => 8,
        2 => 7,
        3 => 14,
        5 => 9,
        7 => 11,
        9 => 5,
        11 => 7,
        // even months: 4/4, 6/6, 8/8, 10/10, 12/12
        _ => month,
    }
}

/// # Errors
///
/// Returns `CalendarError` for dates outside the playable range.
pub fn walkthrough(date: NaiveDate) -> Result<DoomsdayWalkthrough, CalendarError> {
    if !in_range(date) {
        return Err(CalendarError::OutOfRange(date));
    }
    let anchor = century_anchor(date.year());
    let year_in_century = date.year().rem_euclid(100).unsigned_abs();
    let twelves = year_in_century / 12;
    let remainder = year_in_century % 12;
    let fours = remainder / 4;
    let sum = u32::from(anchor) + twelves + remainder + fours;
    let doomsday = (sum % 7) as u8;

    let doom_day = month_doomsday_day(date.year(), date.month());
    let month_doomsday = date.with_day(doom_day).unwrap_or(date);
    let offset_days = i64::from(date.day()) - i64::from(doom_day);
    let answer = (i64::from(doomsday) + offset_days).rem_euclid(7) as u8;

    Ok(DoomsdayWalkthrough {
        date,
        anchor: weekday_from_index(anchor)?,
        year_in_century,
        twelves,
        remainder,
        fours,
        sum,
        doomsday: weekday_from_index(doomsday)?,
        month_doomsday,
        offset_days,
        answer: weekday_from_index(answer)?,
    })
}
