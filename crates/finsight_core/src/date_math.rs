//! Calendar-month helpers for forecasting.
//!
//! Month stepping is done with plain calendar arithmetic rather than jiff
//! `Span`s so a forecast step never fails on day overflow: the day of month
//! is clamped to the length of the target month (Jan 31 + 1 month = Feb 28/29).

use jiff::civil::Date;

#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Step `months` calendar months forward from `d`, clamping the day.
///
/// Returns `None` when the result falls outside jiff's supported year range.
pub fn add_months(d: Date, months: u32) -> Option<Date> {
    let zero_based = i64::from(d.year()) * 12 + i64::from(d.month() - 1) + i64::from(months);
    let year = i16::try_from(zero_based.div_euclid(12)).ok()?;
    let month = (zero_based.rem_euclid(12) + 1) as i8;
    let day = d.day().min(days_in_month(year, month));
    Date::new(year, month, day).ok()
}

/// Number of months, counting the month of `d`, that [`add_months`] can
/// still reach before running off the end of the calendar
pub fn months_remaining(d: Date) -> u32 {
    let month_index = |d: Date| i64::from(d.year()) * 12 + i64::from(d.month() - 1);
    u32::try_from(month_index(Date::MAX) - month_index(d) + 1).unwrap_or(u32::MAX)
}

/// True when both dates fall in the same calendar month
#[inline]
pub fn same_month(a: Date, b: Date) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
