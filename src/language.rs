use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Locales the status texts and entity names are available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Hebrew,
    English,
}

/// Status phrases used when the summary is not taken from a holiday record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTexts {
    pub big_vacation_high: &'static str,
    pub sabbath: &'static str,
    pub no_classes_high: &'static str,
    pub school_day: &'static str,
    pub holiday: &'static str,
}

/// Display names for the entities and the device that groups them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityNames {
    pub summary: &'static str,
    pub elementary_vacation: &'static str,
    pub high_vacation: &'static str,
    pub device_name: &'static str,
}

const HEBREW_TEXTS: StatusTexts = StatusTexts {
    big_vacation_high: "חופש גדול - על יסודי",
    sabbath: "יום שבת",
    no_classes_high: "אין לימודים - על יסודי",
    school_day: "יום לימודים",
    holiday: "חופשה",
};

const ENGLISH_TEXTS: StatusTexts = StatusTexts {
    big_vacation_high: "Big vacation - high school",
    sabbath: "Sabbath",
    no_classes_high: "No classes - high school",
    school_day: "School day",
    holiday: "Holiday",
};

const HEBREW_NAMES: EntityNames = EntityNames {
    summary: "סטטוס חופשת בתי ספר",
    elementary_vacation: "חופש בית ספר יסודי",
    high_vacation: "חופש בית ספר על יסודי",
    device_name: "חופשות בתי ספר בישראל",
};

const ENGLISH_NAMES: EntityNames = EntityNames {
    summary: "School Status",
    elementary_vacation: "Elementary School Vacation",
    high_vacation: "High School Vacation",
    device_name: "Israel School Holidays",
};

impl Language {
    pub const ALL: [Language; 2] = [Language::Hebrew, Language::English];

    /// Parse a language tag. Unknown tags resolve to the default locale.
    pub fn from_tag(tag: &str) -> Self {
        match Self::parse_tag(tag) {
            Some(language) => language,
            None => {
                tracing::warn!(tag, "unsupported language tag, using default locale");
                Language::default()
            }
        }
    }

    /// Strict variant of [`Language::from_tag`].
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "he" | "he-il" | "iw" | "hebrew" => Some(Language::Hebrew),
            "en" | "en-us" | "en-gb" | "english" => Some(Language::English),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::Hebrew => "he",
            Language::English => "en",
        }
    }

    /// Name of the language in its own script, as offered in option lists.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Hebrew => "עברית",
            Language::English => "English",
        }
    }

    pub fn texts(self) -> &'static StatusTexts {
        match self {
            Language::Hebrew => &HEBREW_TEXTS,
            Language::English => &ENGLISH_TEXTS,
        }
    }

    pub fn entity_names(self) -> &'static EntityNames {
        match self {
            Language::Hebrew => &HEBREW_NAMES,
            Language::English => &ENGLISH_NAMES,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Language::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_falls_back_to_hebrew() {
        assert_eq!(Language::from_tag("fr"), Language::Hebrew);
        assert_eq!(Language::from_tag(""), Language::Hebrew);
        assert_eq!(Language::parse_tag("fr"), None);
    }

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(Language::from_tag("EN"), Language::English);
        assert_eq!(Language::from_tag(" he "), Language::Hebrew);
    }

    #[test]
    fn deserializing_unknown_language_does_not_fail() {
        let language: Language = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(language, Language::Hebrew);
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
    }
}
