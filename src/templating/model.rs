//! Hierarchical calendar views of a single date.
//!
//! A [`DateModel`] is the snapshot a pattern addresses: `Year`, `Month` and
//! `Day` at the top, each nesting the finer-grained views that make sense in
//! its scope. The same record type can mean different things depending on
//! where it hangs: `Month.Day` is the day of the month, `Year.Day` the day of
//! the year; `Month.Week` is the week of the month, `Year.Week` the ISO week.
//!
//! Every builder is a pure function of the date it is given.

use crate::caltools;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A weekday, indexed from Sunday = 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeekdayView {
    pub num: u32,
    pub pad: String,
    pub ord: String,
    pub name: String,
    pub short: String,
}

/// A day number; day of the month or day of the year depending on its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayView {
    pub num: u32,
    pub pad: String,
    pub ord: String,
}

/// A week number together with the weekday of the date inside that week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeekView {
    pub num: u32,
    pub pad: String,
    pub ord: String,
    pub day: WeekdayView,
}

/// The month of a date, with the day and week positions inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonthView {
    pub num: u32,
    pub pad: String,
    pub ord: String,
    pub name: String,
    pub short: String,
    pub days_in: u32,
    /// Day of the month.
    pub day: DayView,
    /// Week of the month.
    pub week: WeekView,
}

/// The year of a date, with the month, ISO week and day-of-year inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct YearView {
    pub num: i32,
    pub short: String,
    /// ISO 8601 week-numbering year; differs from `num` in the days around New Year.
    pub iso_year: i32,
    pub days_in: u32,
    pub month: MonthView,
    /// ISO week of the year.
    pub week: WeekView,
    /// Day of the year.
    pub day: DayView,
}

/// Day of the month plus the name of the weekday it falls on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarDayView {
    pub num: u32,
    pub pad: String,
    pub ord: String,
    pub name: String,
    pub short: String,
}

/// Complete calendar snapshot of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateModel {
    pub year: YearView,
    pub month: MonthView,
    pub day: CalendarDayView,
}

fn day_view(num: u32, width: usize) -> DayView {
    DayView {
        num,
        pad: format!("{:0width$}", num, width = width),
        ord: caltools::ordinal(num),
    }
}

fn week_view(num: u32, date: NaiveDate) -> WeekView {
    WeekView {
        num,
        pad: format!("{:02}", num),
        ord: caltools::ordinal(num),
        day: build_weekday_view(date),
    }
}

/// Weekday of `date`: index from Sunday, English name and abbreviation.
pub fn build_weekday_view(date: NaiveDate) -> WeekdayView {
    let num = date.weekday().num_days_from_sunday();
    WeekdayView {
        num,
        pad: format!("{:02}", num),
        ord: caltools::ordinal(num),
        name: date.format("%A").to_string(),
        short: date.format("%a").to_string(),
    }
}

/// Month of `date` with its day-of-month and week-of-month views.
pub fn build_month_view(date: NaiveDate) -> MonthView {
    let num = date.month();
    MonthView {
        num,
        pad: format!("{:02}", num),
        ord: caltools::ordinal(num),
        name: date.format("%B").to_string(),
        short: date.format("%b").to_string(),
        days_in: caltools::days_in_month(date),
        day: day_view(date.day(), 2),
        week: week_view(caltools::week_of_month(date), date),
    }
}

/// Year of `date` with its month, ISO week and day-of-year views.
pub fn build_year_view(date: NaiveDate) -> YearView {
    let iso = date.iso_week();
    YearView {
        num: date.year(),
        short: format!("{:02}", date.year().rem_euclid(100)),
        iso_year: iso.year(),
        days_in: caltools::days_in_year(date),
        month: build_month_view(date),
        week: week_view(iso.week(), date),
        day: day_view(date.ordinal(), 3),
    }
}

fn build_calendar_day_view(date: NaiveDate) -> CalendarDayView {
    let num = date.day();
    CalendarDayView {
        num,
        pad: format!("{:02}", num),
        ord: caltools::ordinal(num),
        name: date.format("%A").to_string(),
        short: date.format("%a").to_string(),
    }
}

/// Builds the full calendar snapshot of `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use journal::templating::build_date_model;
///
/// let model = build_date_model(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
/// assert_eq!(model.year.num, 2024);
/// assert_eq!(model.year.short, "24");
/// assert_eq!(model.year.day.ord, "180th");
/// assert_eq!(model.month.name, "June");
/// assert_eq!(model.day.name, "Friday");
/// ```
pub fn build_date_model(date: NaiveDate) -> DateModel {
    DateModel {
        year: build_year_view(date),
        month: build_month_view(date),
        day: build_calendar_day_view(date),
    }
}
