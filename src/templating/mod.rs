//! Calendar-aware template resolution.
//!
//! This is the pure core of the application: given one captured date it
//! builds a [`TemplateContext`] and resolves user patterns against it. Nothing
//! in here reads the clock, the file system or the configuration file.
//!
//! ```
//! use chrono::NaiveDate;
//! use journal::templating::{resolve, TemplateContext};
//!
//! let instant = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
//! let context = TemplateContext::assemble(instant).unwrap();
//!
//! assert_eq!(
//!     resolve("{WeekCommencing.Year.Num}/{WeekCommencing.Month.Pad}/wc {WeekCommencing.Day.Pad}", &context).unwrap(),
//!     "2024/06/wc 24"
//! );
//! ```

pub mod context;
pub mod model;
pub mod pattern;

pub use context::TemplateContext;
pub use model::{
    build_date_model, build_month_view, build_weekday_view, build_year_view, CalendarDayView,
    DateModel, DayView, MonthView, WeekView, WeekdayView, YearView,
};
pub use pattern::{lookup, placeholders, resolve, Pattern};
