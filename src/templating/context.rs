//! The data graph patterns are resolved against.

use crate::caltools;
use crate::errors::CalendarError;
use crate::templating::model::{build_date_model, DateModel};
use chrono::NaiveDate;
use serde::Serialize;

/// Everything a pattern can reference for one entry-creation operation.
///
/// Both date branches are derived from a single captured instant and cannot
/// be changed afterwards: `Now` is the instant itself, `WeekCommencing` the
/// Monday that begins its week. Only the entry metadata is settable, and the
/// setters store exactly what they are given.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use journal::templating::TemplateContext;
///
/// let instant = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let mut context = TemplateContext::assemble(instant).unwrap();
/// context.set_entry_id("standup");
///
/// // The week of 1st May 2024 began in April.
/// assert_eq!(context.now().month.num, 5);
/// assert_eq!(context.week_commencing().month.num, 4);
/// assert_eq!(context.entry_id(), "standup");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateContext {
    #[serde(skip)]
    instant: NaiveDate,
    now: DateModel,
    week_commencing: DateModel,
    #[serde(rename = "EntryID")]
    entry_id: String,
    file_extension: String,
    topic: String,
}

impl TemplateContext {
    /// Builds both date branches from `instant`, with empty entry metadata.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::OutOfRange` if the Monday of the instant's week
    /// is not representable.
    pub fn assemble(instant: NaiveDate) -> Result<Self, CalendarError> {
        let monday = caltools::week_commencing(instant)?;
        Ok(TemplateContext {
            instant,
            now: build_date_model(instant),
            week_commencing: build_date_model(monday),
            entry_id: String::new(),
            file_extension: String::new(),
            topic: String::new(),
        })
    }

    /// The instant both branches were built from.
    pub fn instant(&self) -> NaiveDate {
        self.instant
    }

    pub fn now(&self) -> &DateModel {
        &self.now
    }

    pub fn week_commencing(&self) -> &DateModel {
        &self.week_commencing
    }

    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_entry_id(&mut self, entry_id: impl Into<String>) {
        self.entry_id = entry_id.into();
    }

    pub fn set_file_extension(&mut self, file_extension: impl Into<String>) {
        self.file_extension = file_extension.into();
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }
}
