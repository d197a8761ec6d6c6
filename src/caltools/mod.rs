//! Calendar arithmetic used to build the template context.
//!
//! Weeks start on Monday throughout. Every function here is pure; the only
//! fallible one is [`week_commencing`], which can step below the earliest
//! date chrono represents.

use crate::errors::CalendarError;
use chrono::{Datelike, Days, NaiveDate};

/// Number of days in a week.
const DAYS_PER_WEEK: u32 = 7;

/// Returns the 1-based, Monday-start week of the month containing `date`.
///
/// `offset` is how far the 1st sits from the preceding Monday. The week is
/// `(day + offset) / 7`, plus one unless `day + offset` lands on a multiple
/// of 7 in a month that does not start on a Monday. A partial leading week
/// is week 1 and the result is always in `1..=6`.
///
/// In a month that starts on a Monday the 7th, 14th, 21st and 28th count
/// with the week that follows them.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use journal::caltools::week_of_month;
///
/// // March 2024 starts on a Friday.
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// assert_eq!(week_of_month(sunday), 1);
/// assert_eq!(week_of_month(monday), 2);
///
/// // April 2024 starts on a Monday.
/// let seventh = NaiveDate::from_ymd_opt(2024, 4, 7).unwrap();
/// assert_eq!(week_of_month(seventh), 2);
/// ```
pub fn week_of_month(date: NaiveDate) -> u32 {
    let offset = first_of_month_offset(date);
    let position = date.day() + offset;
    let week = position / DAYS_PER_WEEK;

    if offset == 0 || position % DAYS_PER_WEEK != 0 {
        week + 1
    } else {
        week
    }
}

/// Returns the Monday that begins the week containing `date`.
///
/// The result is never after `date`, and applying the function twice gives
/// the same Monday.
///
/// # Errors
///
/// Returns `CalendarError::OutOfRange` if that Monday falls before the
/// earliest representable date.
pub fn week_commencing(date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    let offset = date.weekday().num_days_from_monday();
    date.checked_sub_days(Days::new(u64::from(offset)))
        .ok_or(CalendarError::OutOfRange { date })
}

/// Returns the English ordinal suffix for `n` ("st", "nd", "rd" or "th").
///
/// # Examples
///
/// ```
/// use journal::caltools::ordinal_suffix;
///
/// assert_eq!(ordinal_suffix(1), "st");
/// assert_eq!(ordinal_suffix(12), "th");
/// assert_eq!(ordinal_suffix(22), "nd");
/// assert_eq!(ordinal_suffix(113), "th");
/// ```
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }

    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Formats `n` followed by its ordinal suffix, e.g. `180th`.
pub fn ordinal(n: u32) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(date.year()) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Number of days in the year containing `date`.
pub fn days_in_year(date: NaiveDate) -> u32 {
    if is_leap_year(date.year()) {
        366
    } else {
        365
    }
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

// Days between the Monday on or before the 1st of the month and the 1st itself.
fn first_of_month_offset(date: NaiveDate) -> u32 {
    let weekday = date.weekday().num_days_from_monday();
    let back = (date.day() - 1) % DAYS_PER_WEEK;
    (weekday + DAYS_PER_WEEK - back) % DAYS_PER_WEEK
}
