//! Display adapters. They read a [`StatusSnapshot`] and the configured
//! language and turn them into entity views; no status logic lives here.

use crate::config::Configuration;
use crate::language::Language;
use crate::resolver::StatusSnapshot;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const DOMAIN: &str = "school_holidays";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MANUFACTURER: &str = "Yuval Mejahez";
pub const MODEL: &str = "School Calendar Tracker";
pub const CONFIGURATION_URL: &str = "https://github.com/rt400/School-Vacation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    ElementaryVacation,
    HighVacation,
    Summary,
}

impl EntityKind {
    pub fn key(self) -> &'static str {
        match self {
            EntityKind::ElementaryVacation => "elementary_vacation",
            EntityKind::HighVacation => "high_vacation",
            EntityKind::Summary => "summary",
        }
    }

    pub fn entity_id(self) -> String {
        match self {
            EntityKind::Summary => "sensor.school_summary".to_string(),
            other => format!("binary_sensor.{}", other.key()),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EntityKind::HighVacation => "mdi:school-outline",
            EntityKind::ElementaryVacation | EntityKind::Summary => "mdi:school",
        }
    }

    pub fn display_name(self, language: Language) -> &'static str {
        let names = language.entity_names();
        match self {
            EntityKind::ElementaryVacation => names.elementary_vacation,
            EntityKind::HighVacation => names.high_vacation,
            EntityKind::Summary => names.summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub identifier: String,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub sw_version: &'static str,
    pub configuration_url: &'static str,
}

pub fn device_info(entry_id: &str, language: Language) -> DeviceInfo {
    DeviceInfo {
        identifier: format!("{DOMAIN}:{entry_id}"),
        name: language.entity_names().device_name.to_string(),
        manufacturer: MANUFACTURER,
        model: MODEL,
        sw_version: VERSION,
        configuration_url: CONFIGURATION_URL,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinarySensorAttributes {
    pub summary: String,
    pub last_update: NaiveDateTime,
    pub sensor_type: &'static str,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySensorAttributes {
    pub elementary_vacation: bool,
    pub high_vacation: bool,
    pub last_update: NaiveDateTime,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum EntityState {
    BinarySensor {
        is_on: Option<bool>,
        attributes: Option<BinarySensorAttributes>,
    },
    Sensor {
        native_value: Option<String>,
        attributes: Option<SummarySensorAttributes>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub entity_id: String,
    pub unique_id: String,
    pub name: &'static str,
    pub icon: &'static str,
    pub available: bool,
    pub state: EntityState,
}

impl EntityView {
    pub fn new(
        kind: EntityKind,
        entry_id: &str,
        language: Language,
        snapshot: Option<&StatusSnapshot>,
    ) -> Self {
        let state = match kind {
            EntityKind::Summary => EntityState::Sensor {
                native_value: snapshot.map(|s| s.summary.clone()),
                attributes: snapshot.map(|s| SummarySensorAttributes {
                    elementary_vacation: s.elementary_vacation,
                    high_vacation: s.high_vacation,
                    last_update: s.computed_at,
                    language,
                }),
            },
            EntityKind::ElementaryVacation | EntityKind::HighVacation => {
                EntityState::BinarySensor {
                    is_on: snapshot.map(|s| match kind {
                        EntityKind::ElementaryVacation => s.elementary_vacation,
                        _ => s.high_vacation,
                    }),
                    attributes: snapshot.map(|s| BinarySensorAttributes {
                        summary: s.summary.clone(),
                        last_update: s.computed_at,
                        sensor_type: kind.key(),
                        language,
                    }),
                }
            }
        };

        Self {
            kind,
            entity_id: kind.entity_id(),
            unique_id: format!("{entry_id}_{}", kind.key()),
            name: kind.display_name(language),
            icon: kind.icon(),
            available: snapshot.is_some(),
            state,
        }
    }

    pub fn is_on(&self) -> Option<bool> {
        match &self.state {
            EntityState::BinarySensor { is_on, .. } => *is_on,
            EntityState::Sensor { .. } => None,
        }
    }
}

/// Entities to expose for `config`: the summary sensor always, each binary
/// sensor only when its audience is enabled.
pub fn entity_views(
    entry_id: &str,
    config: &Configuration,
    snapshot: Option<&StatusSnapshot>,
) -> Vec<EntityView> {
    let mut kinds = Vec::with_capacity(3);
    if config.elementary_enabled {
        kinds.push(EntityKind::ElementaryVacation);
    }
    if config.high_enabled {
        kinds.push(EntityKind::HighVacation);
    }
    kinds.push(EntityKind::Summary);

    kinds
        .into_iter()
        .map(|kind| EntityView::new(kind, entry_id, config.language, snapshot))
        .collect()
}
