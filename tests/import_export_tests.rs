use chrono::NaiveDate;
use school_holidays::{
    Configuration, HolidayRecord, HolidayTable, Language, PersistenceError, StatusKind,
    load_config_from_json, load_table_from_csv, load_table_from_json, resolve,
    save_config_to_json, save_table_to_csv, save_table_to_json,
};
use std::fs;
use tempfile::NamedTempFile;

#[test]
fn json_table_round_trip() {
    let table = HolidayTable::bundled();
    let tmp = NamedTempFile::new().unwrap();
    save_table_to_json(&table, tmp.path()).unwrap();
    let loaded = load_table_from_json(tmp.path()).unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn csv_table_keeps_ranges_and_flags() {
    let table = HolidayTable::bundled();
    let tmp = NamedTempFile::new().unwrap();
    save_table_to_csv(&table, tmp.path()).unwrap();
    let loaded = load_table_from_csv(tmp.path()).unwrap();
    assert_eq!(loaded.len(), table.len());

    let expected: Vec<_> = table.ranges().map(|(_, r)| r.unwrap()).collect();
    let actual: Vec<_> = loaded.ranges().map(|(_, r)| r.unwrap()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn json_table_in_source_format_loads() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(
        tmp.path(),
        r#"[{"START": "2026-09-11", "END": "2026-09-13", "SUMMARY": "ראש השנה"},
            {"START": "2026-09-20", "END": "2026-09-20", "HIGH": "True", "SUMMARY": "x"}]"#,
    )
    .unwrap();
    let table = load_table_from_json(tmp.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0], HolidayRecord::new("2026-09-11", "2026-09-13", "ראש השנה"));
}

#[test]
fn json_row_with_wrong_types_does_not_fail_the_file() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(
        tmp.path(),
        r#"[{"START": "2025-11-10", "END": "2025-11-20", "SUMMARY": "valid"},
            {"START": 20251201, "END": "2025-12-02", "HIGH": [1], "SUMMARY": 7}]"#,
    )
    .unwrap();
    let table = load_table_from_json(tmp.path()).unwrap();
    assert_eq!(table.len(), 2);

    let invalid = table.invalid_records();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].0, 1);
    let mistyped = &table.records()[1];
    assert_eq!(mistyped.start.as_deref(), Some("20251201"));
    assert_eq!(mistyped.high, None);
    assert_eq!(mistyped.summary.as_deref(), Some("7"));

    let status = resolve(
        NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(),
        &table,
        &Configuration::default(),
        NaiveDate::from_ymd_opt(2025, 11, 12).unwrap().and_hms_opt(0, 0, 0).unwrap(),
    );
    assert_eq!(status.kind, StatusKind::Holiday);
    assert_eq!(status.summary, "valid");
}

#[test]
fn json_table_must_be_an_array() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(tmp.path(), r#"{"START": "2025-11-10"}"#).unwrap();
    let err = load_table_from_json(tmp.path()).unwrap_err();
    assert!(matches!(err, PersistenceError::Serialization(_)));
}

#[test]
fn csv_with_malformed_row_still_loads() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(
        tmp.path(),
        "START,END,HIGH,SUMMARY,SUMMARY_EN\n,2025-11-02,,missing start,\n2025-11-03,2025-11-04,True,high,\n",
    )
    .unwrap();
    let table = load_table_from_csv(tmp.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.invalid_records().len(), 1);
    assert!(table.records()[0].start.is_none());
}

#[test]
fn empty_table_is_rejected() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(tmp.path(), "[]").unwrap();
    let err = load_table_from_json(tmp.path()).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table_from_json(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, PersistenceError::Io(_)));
}

#[test]
fn config_round_trip_and_defaults() {
    let tmp = NamedTempFile::new().unwrap();
    let config = Configuration {
        language: Language::English,
        elementary_enabled: false,
        high_enabled: true,
        friday_high_enabled: false,
    };
    save_config_to_json(&config, tmp.path()).unwrap();
    assert_eq!(load_config_from_json(tmp.path()).unwrap(), config);

    fs::write(tmp.path(), r#"{"language": "xx", "high_school": false}"#).unwrap();
    let partial = load_config_from_json(tmp.path()).unwrap();
    assert_eq!(partial.language, Language::Hebrew);
    assert!(!partial.high_enabled);
    assert!(partial.elementary_enabled);
    assert!(partial.friday_high_enabled);
}

#[test]
fn config_must_be_an_object() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(tmp.path(), "[1, 2]").unwrap();
    let err = load_config_from_json(tmp.path()).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}
