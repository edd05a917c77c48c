use super::{PersistenceError, PersistenceResult};
use crate::calendar::{FlagValue, HolidayRecord, HolidayTable};
use crate::config::Configuration;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub fn save_table_to_json<P: AsRef<Path>>(table: &HolidayTable, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, table.records())?;
    Ok(())
}

pub fn load_table_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<HolidayTable> {
    let file = File::open(path)?;
    let rows: Vec<serde_json::Value> = serde_json::from_reader(file)?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| record_from_json_row(idx, row))
        .collect();
    let table = HolidayTable::new(records);
    super::validate_table(&table)?;
    Ok(table)
}

/// Mistyped rows are kept with the fields that could be read, so that one bad
/// row shows up as a malformed record instead of failing the whole file.
fn record_from_json_row(idx: usize, row: serde_json::Value) -> HolidayRecord {
    match serde_json::from_value::<HolidayRecord>(row.clone()) {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(index = idx, error = %err, "holiday row has unexpected field types");
            let field = |name: &str| row.get(name).and_then(json_text);
            HolidayRecord {
                start: field("START"),
                end: field("END"),
                high: row
                    .get("HIGH")
                    .and_then(|value| serde_json::from_value::<Option<FlagValue>>(value.clone()).ok())
                    .flatten(),
                summary: field("SUMMARY"),
                summary_en: field("SUMMARY_EN"),
            }
        }
    }
}

fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Default, Serialize, Deserialize)]
struct HolidayCsvRecord {
    #[serde(rename = "START")]
    start: String,
    #[serde(rename = "END")]
    end: String,
    #[serde(rename = "HIGH", default)]
    high: String,
    #[serde(rename = "SUMMARY", default)]
    summary: String,
    #[serde(rename = "SUMMARY_EN", default)]
    summary_en: String,
}

impl From<&HolidayRecord> for HolidayCsvRecord {
    fn from(record: &HolidayRecord) -> Self {
        Self {
            start: record.start.clone().unwrap_or_default(),
            end: record.end.clone().unwrap_or_default(),
            high: record.high.as_ref().map(format_flag).unwrap_or_default(),
            summary: record.summary.clone().unwrap_or_default(),
            summary_en: record.summary_en.clone().unwrap_or_default(),
        }
    }
}

impl From<HolidayCsvRecord> for HolidayRecord {
    fn from(row: HolidayCsvRecord) -> Self {
        Self {
            start: parse_string_option(row.start),
            end: parse_string_option(row.end),
            high: parse_string_option(row.high).map(FlagValue::Text),
            summary: parse_string_option(row.summary),
            summary_en: parse_string_option(row.summary_en),
        }
    }
}

pub fn save_table_to_csv<P: AsRef<Path>>(table: &HolidayTable, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for record in table.records() {
        writer.serialize(HolidayCsvRecord::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_table_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<HolidayTable> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize::<HolidayCsvRecord>() {
        records.push(HolidayRecord::from(row?));
    }
    let table = HolidayTable::new(records);
    super::validate_table(&table)?;
    Ok(table)
}

pub fn save_config_to_json<P: AsRef<Path>>(
    config: &Configuration,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Configuration> {
    let file = File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(file)?;
    if !value.is_object() {
        return Err(PersistenceError::InvalidData(
            "configuration must be a JSON object".into(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

fn format_flag(flag: &FlagValue) -> String {
    match flag {
        FlagValue::Bool(value) => value.to_string(),
        FlagValue::Number(value) => value.to_string(),
        FlagValue::Text(text) => text.clone(),
    }
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
