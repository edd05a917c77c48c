use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Boolean-like value accepted for the `HIGH` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl FlagValue {
    /// `None` when the text is not a recognizable boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(value) => Some(*value),
            FlagValue::Number(value) => Some(*value != 0),
            FlagValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "y" | "on" => Some(true),
                "false" | "0" | "no" | "n" | "off" | "" => Some(false),
                _ => None,
            },
        }
    }

    /// Unrecognized text counts as set, like any other non-empty value.
    pub fn is_set(&self) -> bool {
        self.as_bool().unwrap_or(true)
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

/// One holiday entry as it appears in the bundled table or a table file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HolidayRecord {
    #[serde(rename = "START", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(rename = "END", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(rename = "HIGH", default, skip_serializing_if = "Option::is_none")]
    pub high: Option<FlagValue>,
    #[serde(rename = "SUMMARY", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "SUMMARY_EN", default, skip_serializing_if = "Option::is_none")]
    pub summary_en: Option<String>,
}

impl HolidayRecord {
    pub fn new(start: &str, end: &str, summary: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            high: None,
            summary: Some(summary.to_string()),
            summary_en: None,
        }
    }

    pub fn high_school_only(mut self) -> Self {
        self.high = Some(FlagValue::Bool(true));
        self
    }

    pub fn with_english(mut self, summary_en: &str) -> Self {
        self.summary_en = Some(summary_en.to_string());
        self
    }
}

/// Validated holiday range. `start <= end`, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub high_school_only: bool,
    pub summary: Option<String>,
    pub summary_en: Option<String>,
}

impl HolidayRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    MissingField(&'static str),
    InvalidDate {
        field: &'static str,
        value: String,
        reason: String,
    },
    StartAfterEnd {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField(field) => write!(f, "missing field {field}"),
            RecordError::InvalidDate {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} date '{value}': {reason}"),
            RecordError::StartAfterEnd { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
        }
    }
}

impl std::error::Error for RecordError {}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<NaiveDate, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?;
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| RecordError::InvalidDate {
        field,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

impl TryFrom<&HolidayRecord> for HolidayRange {
    type Error = RecordError;

    fn try_from(record: &HolidayRecord) -> Result<Self, Self::Error> {
        let start = parse_date("START", record.start.as_deref())?;
        let end = parse_date("END", record.end.as_deref())?;
        if start > end {
            return Err(RecordError::StartAfterEnd { start, end });
        }
        let high_school_only = match &record.high {
            None => false,
            Some(flag) => {
                if flag.as_bool().is_none() {
                    tracing::warn!(?flag, %start, "unrecognized HIGH flag, treating as set");
                }
                flag.is_set()
            }
        };
        Ok(Self {
            start,
            end,
            high_school_only,
            summary: record.summary.clone(),
            summary_en: record.summary_en.clone(),
        })
    }
}

/// Ordered, immutable holiday table. Earlier records win when ranges overlap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HolidayTable {
    records: Vec<HolidayRecord>,
}

impl HolidayTable {
    pub fn new(records: Vec<HolidayRecord>) -> Self {
        Self { records }
    }

    /// The table shipped with the crate, 2025-07-01 through 2026-08-31.
    pub fn bundled() -> Self {
        let records = BUNDLED
            .iter()
            .map(|entry| HolidayRecord {
                start: Some(entry.start.to_string()),
                end: Some(entry.end.to_string()),
                high: entry.high.then_some(FlagValue::Bool(true)),
                summary: Some(entry.summary.to_string()),
                summary_en: Some(entry.summary_en.to_string()),
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[HolidayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record paired with its validation outcome, in table order.
    pub fn ranges(&self) -> impl Iterator<Item = (usize, Result<HolidayRange, RecordError>)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx, HolidayRange::try_from(record)))
    }

    /// First valid range containing `date`. Malformed records are logged and skipped.
    pub fn find(&self, date: NaiveDate) -> Option<HolidayRange> {
        for (idx, range) in self.ranges() {
            match range {
                Ok(range) if range.contains(date) => return Some(range),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(index = idx, error = %err, "skipping invalid holiday record");
                }
            }
        }
        None
    }

    pub fn invalid_records(&self) -> Vec<(usize, RecordError)> {
        self.ranges()
            .filter_map(|(idx, range)| range.err().map(|err| (idx, err)))
            .collect()
    }

    /// Earliest start and latest end over the valid records.
    pub fn coverage(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.ranges()
            .filter_map(|(_, range)| range.ok())
            .fold(None, |acc, range| match acc {
                None => Some((range.start, range.end)),
                Some((start, end)) => Some((start.min(range.start), end.max(range.end))),
            })
    }
}

impl From<Vec<HolidayRecord>> for HolidayTable {
    fn from(records: Vec<HolidayRecord>) -> Self {
        Self::new(records)
    }
}

struct BundledEntry {
    start: &'static str,
    end: &'static str,
    high: bool,
    summary: &'static str,
    summary_en: &'static str,
}

const BUNDLED: &[BundledEntry] = &[
    BundledEntry {
        start: "2025-07-01",
        end: "2025-08-31",
        high: false,
        summary: "חופשת קיץ",
        summary_en: "Summer vacation",
    },
    BundledEntry {
        start: "2025-09-22",
        end: "2025-09-24",
        high: false,
        summary: "ראש השנה",
        summary_en: "Rosh Hashanah",
    },
    BundledEntry {
        start: "2025-10-01",
        end: "2025-10-02",
        high: false,
        summary: "יום הכיפורים",
        summary_en: "Yom Kippur",
    },
    BundledEntry {
        start: "2025-10-03",
        end: "2025-10-05",
        high: false,
        summary: "ימי חופשה בין יום הכיפורים לחג סוכות",
        summary_en: "Vacation days between Yom Kippur and Sukkot",
    },
    BundledEntry {
        start: "2025-10-06",
        end: "2025-10-14",
        high: false,
        summary: "חג סוכות",
        summary_en: "Sukkot",
    },
    BundledEntry {
        start: "2025-10-15",
        end: "2025-10-15",
        high: true,
        summary: "אסרו חג סוכות הוא יום לימודים בגני הילדים, בתי הספר היסודיים וחטיבות הביניים ויום חופש בחטיבות העליונות ובתיכונים.",
        summary_en: "Isru Chag Sukkot is a school day in kindergartens, elementary and middle schools and a day off in high schools.",
    },
    BundledEntry {
        start: "2025-12-16",
        end: "2025-12-22",
        high: false,
        summary: "חג החנוכה",
        summary_en: "Hanukkah",
    },
    BundledEntry {
        start: "2026-03-03",
        end: "2026-03-04",
        high: false,
        summary: "חופשת חג פורים",
        summary_en: "Purim vacation",
    },
    BundledEntry {
        start: "2026-03-24",
        end: "2026-04-08",
        high: false,
        summary: "חופשת חג הפסח",
        summary_en: "Passover vacation",
    },
    BundledEntry {
        start: "2026-04-22",
        end: "2026-04-22",
        high: false,
        summary: "יום העצמאות",
        summary_en: "Independence Day",
    },
    BundledEntry {
        start: "2026-05-05",
        end: "2026-05-05",
        high: true,
        summary: "ל\"ג בעומר הוא יום לימודים בגני הילדים, בתי הספר היסודיים וחטיבות הביניים, ויום חופש בחטיבות העליונות ובתיכונים (כיתות י'-יב')",
        summary_en: "Lag BaOmer is a school day in kindergartens, elementary and middle schools, and a day off in high schools (grades 10-12)",
    },
    BundledEntry {
        start: "2026-05-21",
        end: "2026-05-22",
        high: false,
        summary: "חג השבועות",
        summary_en: "Shavuot",
    },
    BundledEntry {
        start: "2026-06-19",
        end: "2026-06-30",
        high: true,
        summary: "חופשת קיץ תיכון",
        summary_en: "High school summer vacation",
    },
    BundledEntry {
        start: "2026-07-01",
        end: "2026-08-31",
        high: false,
        summary: "חופשת קיץ",
        summary_en: "Summer vacation",
    },
];
