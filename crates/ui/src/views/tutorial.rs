use std::fmt::Write as _;

use dayguess_core::model::calendar::weekday_name;

use crate::vm::{DoomsdayWalkthrough, format_date};

const INTRO: &str = "\
The Secret Method
Learn to calculate the day of the week for any date in your head.

For any year, a set of easy-to-remember dates all fall on the same day of
the week: the Doomsday. Find it for the year and you can find any day.

Even months: 4/4, 6/6, 8/8, 10/10, 12/12.
Odd months: 9/5 and 5/9, 7/11 and 11/7 (\"9 to 5 at the 7-Eleven\").
March: 3/14. January and February: 1/3 and 2/7, or 1/4 and 2/8 in leap years.

Days as numbers: Sun=0, Mon=1, Tue=2, Wed=3, Thu=4, Fri=5, Sat=6
";

#[must_use]
pub fn render_tutorial(steps: &DoomsdayWalkthrough) -> String {
    let mut out = String::from(INTRO);
    let yy = steps.year_in_century;
    writeln!(out, "\nExample: {}", format_date(steps.date)).ok();
    writeln!(
        out,
        "Step 1: the century's anchor day is {}.",
        weekday_name(steps.anchor)
    )
    .ok();
    writeln!(
        out,
        "Step 2: {yy} / 12 = {}, {yy} % 12 = {}, {} / 4 = {}; sum {} % 7 gives {}.",
        steps.twelves,
        steps.remainder,
        steps.remainder,
        steps.fours,
        steps.sum,
        weekday_name(steps.doomsday)
    )
    .ok();
    writeln!(
        out,
        "Step 3: {} is a doomsday, a {}.",
        format_date(steps.month_doomsday),
        weekday_name(steps.doomsday)
    )
    .ok();
    writeln!(
        out,
        "Step 4: {} days from there lands on a {}.",
        steps.offset_days,
        weekday_name(steps.answer)
    )
    .ok();
    out
}
