use chrono::{NaiveDate, NaiveDateTime};
use school_holidays::{
    Configuration, ConfigurationPatch, Coordinator, HolidayTable, Language, ResolveError,
    StatusKind, StatusSnapshot, StatusSource,
};
use std::sync::Arc;

fn at(s: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

struct FailingSource;

impl StatusSource for FailingSource {
    fn resolve(
        &self,
        _today: NaiveDate,
        _config: &Configuration,
        _now: NaiveDateTime,
    ) -> Result<StatusSnapshot, ResolveError> {
        Err(ResolveError::TableUnavailable("not loaded".into()))
    }
}

struct PanickingSource;

impl StatusSource for PanickingSource {
    fn resolve(
        &self,
        _today: NaiveDate,
        _config: &Configuration,
        _now: NaiveDateTime,
    ) -> Result<StatusSnapshot, ResolveError> {
        panic!("boom");
    }
}

#[test]
fn reader_is_empty_until_first_refresh() {
    let coordinator =
        Coordinator::with_config(Arc::new(HolidayTable::bundled()), Configuration::default());
    let reader = coordinator.reader();
    assert!(reader.current().is_none());

    coordinator.refresh_at(at("2025-07-15"));
    let snapshot = reader.current().unwrap();
    assert!(snapshot.elementary_vacation);
    assert_eq!(snapshot.computed_at, at("2025-07-15"));
}

#[test]
fn refresh_replaces_previous_snapshot() {
    let coordinator =
        Coordinator::with_config(Arc::new(HolidayTable::bundled()), Configuration::default());
    let reader = coordinator.reader();

    let first = coordinator.refresh_at(at("2025-11-08"));
    let held = reader.current().unwrap();
    coordinator.refresh_at(at("2025-11-09"));

    // Earlier handles keep the old, complete snapshot
    assert_eq!(held.kind, StatusKind::Sabbath);
    assert_eq!(first.kind, StatusKind::Sabbath);
    assert_eq!(reader.current().unwrap().kind, StatusKind::SchoolDay);
}

#[test]
fn source_error_falls_back_to_school_day() {
    let coordinator = Coordinator::with_config(Arc::new(FailingSource), Configuration::default());
    let snapshot = coordinator.refresh_at(at("2025-07-15"));
    assert!(!snapshot.elementary_vacation);
    assert!(!snapshot.high_vacation);
    assert_eq!(snapshot.summary, Language::Hebrew.texts().school_day);
    assert_eq!(snapshot.computed_at, at("2025-07-15"));
}

#[test]
fn source_panic_falls_back_to_school_day() {
    let config = Configuration::default().with_language(Language::English);
    let coordinator = Coordinator::with_config(Arc::new(PanickingSource), config);
    let snapshot = coordinator.refresh_at(at("2025-11-08"));
    assert!(snapshot.is_school_day());
    assert_eq!(snapshot.summary, "School day");
    assert_eq!(coordinator.current().unwrap().as_ref(), snapshot.as_ref());
}

#[test]
fn settings_changes_apply_on_next_refresh() {
    let coordinator =
        Coordinator::with_config(Arc::new(HolidayTable::bundled()), Configuration::default());
    let friday = at("2025-11-07");
    assert_eq!(coordinator.refresh_at(friday).kind, StatusKind::FridayHighSchool);

    coordinator.settings().update(&ConfigurationPatch {
        friday_high_enabled: Some(false),
        ..Default::default()
    });
    // stored snapshot unchanged until the next refresh
    assert_eq!(coordinator.current().unwrap().kind, StatusKind::FridayHighSchool);
    assert_eq!(coordinator.refresh_at(friday).kind, StatusKind::SchoolDay);
}
