use crate::calendar::{HolidayRange, HolidayTable};
use crate::config::Configuration;
use crate::language::Language;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rule produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Holiday,
    HighSchoolHoliday,
    FridayHighSchool,
    Sabbath,
    SchoolDay,
}

/// Result of one resolution pass. Never mutated; a refresh replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub date: NaiveDate,
    pub elementary_vacation: bool,
    pub high_vacation: bool,
    pub summary: String,
    pub kind: StatusKind,
    pub language: Language,
    pub computed_at: NaiveDateTime,
}

impl StatusSnapshot {
    /// Safe default used whenever resolution fails: a regular school day.
    pub fn fallback(date: NaiveDate, language: Language, computed_at: NaiveDateTime) -> Self {
        Self {
            date,
            elementary_vacation: false,
            high_vacation: false,
            summary: language.texts().school_day.to_string(),
            kind: StatusKind::SchoolDay,
            language,
            computed_at,
        }
    }

    pub fn is_school_day(&self) -> bool {
        !self.elementary_vacation && !self.high_vacation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    TableUnavailable(String),
    Internal(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::TableUnavailable(msg) => write!(f, "holiday table unavailable: {msg}"),
            ResolveError::Internal(msg) => write!(f, "resolution failed: {msg}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Anything that can produce a status for a day.
pub trait StatusSource: Send + Sync {
    fn resolve(
        &self,
        today: NaiveDate,
        config: &Configuration,
        now: NaiveDateTime,
    ) -> Result<StatusSnapshot, ResolveError>;
}

impl StatusSource for HolidayTable {
    fn resolve(
        &self,
        today: NaiveDate,
        config: &Configuration,
        now: NaiveDateTime,
    ) -> Result<StatusSnapshot, ResolveError> {
        Ok(resolve(today, self, config, now))
    }
}

/// Resolve the status of `today`.
///
/// Holiday ranges are checked first, in table order; weekday rules apply only
/// when no range matches. `elementary_enabled` and `high_enabled` do not
/// affect the result, both flags are always computed.
pub fn resolve(
    today: NaiveDate,
    table: &HolidayTable,
    config: &Configuration,
    now: NaiveDateTime,
) -> StatusSnapshot {
    let language = config.language;
    let texts = language.texts();

    let (elementary_vacation, high_vacation, summary, kind) = match table.find(today) {
        Some(range) if range.high_school_only => (
            false,
            true,
            texts.big_vacation_high.to_string(),
            StatusKind::HighSchoolHoliday,
        ),
        Some(range) => (true, true, range_summary(&range, language), StatusKind::Holiday),
        None => match today.weekday() {
            Weekday::Fri if config.friday_high_enabled => (
                false,
                true,
                texts.no_classes_high.to_string(),
                StatusKind::FridayHighSchool,
            ),
            Weekday::Sat => (true, true, texts.sabbath.to_string(), StatusKind::Sabbath),
            _ => (false, false, texts.school_day.to_string(), StatusKind::SchoolDay),
        },
    };

    StatusSnapshot {
        date: today,
        elementary_vacation,
        high_vacation,
        summary,
        kind,
        language,
        computed_at: now,
    }
}

/// [`resolve`] for the current local date and time.
pub fn resolve_now(table: &HolidayTable, config: &Configuration) -> StatusSnapshot {
    let now = Local::now().naive_local();
    resolve(now.date(), table, config, now)
}

fn range_summary(range: &HolidayRange, language: Language) -> String {
    let localized = match language {
        Language::English => range.summary_en.as_deref().or(range.summary.as_deref()),
        Language::Hebrew => range.summary.as_deref(),
    };
    localized
        .map(str::to_string)
        .unwrap_or_else(|| language.texts().holiday.to_string())
}
