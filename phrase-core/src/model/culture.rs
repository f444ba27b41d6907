use serde::{Deserialize, Serialize};

/// One row of the culture list. Its position in the list is its priority.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    pub id: String,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub name: String,
}

impl LanguageEntry {
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
        }
    }
}

pub fn default_cultures() -> Vec<LanguageEntry> {
    vec![
        LanguageEntry::new("1", "en-US", "English (United States)"),
        LanguageEntry::new("2", "fr-FR", "French (France)"),
        LanguageEntry::new("3", "de-DE", "German (Germany)"),
    ]
}
