use crate::language::Language;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_ELEMENTARY_SCHOOL: bool = true;
pub const DEFAULT_HIGH_SCHOOL: bool = true;
pub const DEFAULT_FRIDAY_HIGH_SCHOOL: bool = true;

/// Per-installation toggles read by the resolver and the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub language: Language,
    #[serde(rename = "elementary_school")]
    pub elementary_enabled: bool,
    #[serde(rename = "high_school")]
    pub high_enabled: bool,
    #[serde(rename = "friday_high_school")]
    pub friday_high_enabled: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            language: Language::default(),
            elementary_enabled: DEFAULT_ELEMENTARY_SCHOOL,
            high_enabled: DEFAULT_HIGH_SCHOOL,
            friday_high_enabled: DEFAULT_FRIDAY_HIGH_SCHOOL,
        }
    }
}

/// Partial update; set fields override the configuration they are applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(
        default,
        rename = "elementary_school",
        skip_serializing_if = "Option::is_none"
    )]
    pub elementary_enabled: Option<bool>,
    #[serde(default, rename = "high_school", skip_serializing_if = "Option::is_none")]
    pub high_enabled: Option<bool>,
    #[serde(
        default,
        rename = "friday_high_school",
        skip_serializing_if = "Option::is_none"
    )]
    pub friday_high_enabled: Option<bool>,
}

impl Configuration {
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_friday_high(mut self, enabled: bool) -> Self {
        self.friday_high_enabled = enabled;
        self
    }

    pub fn apply(&mut self, patch: &ConfigurationPatch) {
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(enabled) = patch.elementary_enabled {
            self.elementary_enabled = enabled;
        }
        if let Some(enabled) = patch.high_enabled {
            self.high_enabled = enabled;
        }
        if let Some(enabled) = patch.friday_high_enabled {
            self.friday_high_enabled = enabled;
        }
    }

    /// Initial entry data with later options layered on top.
    pub fn layered(data: &ConfigurationPatch, options: &ConfigurationPatch) -> Self {
        let mut config = Self::default();
        config.apply(data);
        config.apply(options);
        config
    }
}

/// Shared, runtime-changeable configuration. Changes are picked up by the
/// next refresh.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<Configuration>>,
}

impl SettingsStore {
    pub fn new(config: Configuration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn get(&self) -> Configuration {
        *self.inner.read()
    }

    pub fn set(&self, config: Configuration) {
        *self.inner.write() = config;
    }

    pub fn update(&self, patch: &ConfigurationPatch) -> Configuration {
        let mut guard = self.inner.write();
        guard.apply(patch);
        *guard
    }
}
