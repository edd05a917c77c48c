pub mod calendar;
pub mod config;
pub mod coordinator;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod language;
pub mod persistence;
pub mod presentation;
pub mod resolver;
#[cfg(feature = "scheduler")]
pub mod scheduler;

pub use calendar::{FlagValue, HolidayRange, HolidayRecord, HolidayTable, RecordError};
pub use config::{Configuration, ConfigurationPatch, SettingsStore};
pub use coordinator::{Coordinator, SnapshotReader};
pub use language::Language;
pub use persistence::{
    PersistenceError, load_config_from_json, load_table_from_csv, load_table_from_json,
    save_config_to_json, save_table_to_csv, save_table_to_json,
};
pub use presentation::{DeviceInfo, EntityKind, EntityView, device_info, entity_views};
pub use resolver::{
    ResolveError, StatusKind, StatusSnapshot, StatusSource, resolve, resolve_now,
};
