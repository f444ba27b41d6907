use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::LanguageCatalog;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    #[serde(rename = "React Client")]
    ReactClient,
    #[serde(rename = "Xamarin Client")]
    XamarinClient,
    #[serde(rename = "Digital Door Sign")]
    DigitalDoorSign,
    #[serde(rename = "Digital Whiteboard")]
    DigitalWhiteboard,
    #[serde(rename = "My Stay Mobile")]
    MyStayMobile,
}

impl Namespace {
    pub const ALL: [Namespace; 5] = [
        Namespace::ReactClient,
        Namespace::XamarinClient,
        Namespace::DigitalDoorSign,
        Namespace::DigitalWhiteboard,
        Namespace::MyStayMobile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Namespace::ReactClient => "React Client",
            Namespace::XamarinClient => "Xamarin Client",
            Namespace::DigitalDoorSign => "Digital Door Sign",
            Namespace::DigitalWhiteboard => "Digital Whiteboard",
            Namespace::MyStayMobile => "My Stay Mobile",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.label() == label)
    }
}

/// Reads a namespace label where `null` and `""` both mean "no namespace".
pub fn namespace_or_none<'de, D>(d: D) -> Result<Option<Namespace>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(label) => Namespace::from_label(label)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown namespace: {label}"))),
    }
}

fn patch_namespace<'de, D>(d: D) -> Result<Option<Option<Namespace>>, D::Error>
where
    D: Deserializer<'de>,
{
    namespace_or_none(d).map(Some)
}

/// Present-but-null becomes `Some(None)` so a patch can clear the field.
fn patch_optional<'de, D>(d: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(d).map(Some)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PhraseRow {
    #[serde(default)]
    pub id: String,

    #[serde(default, alias = "phraseKey")]
    pub phrase_key: String,

    #[serde(default, alias = "defaultTranslation")]
    pub default_translation: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub screenshot: Option<String>,

    #[serde(default, deserialize_with = "namespace_or_none")]
    pub namespace: Option<Namespace>,

    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl PhraseRow {
    /// Template used by "Add Phrase": every field empty, one blank slot per catalog language.
    pub fn blank(id: impl Into<String>, catalog: &LanguageCatalog) -> Self {
        Self {
            id: id.into(),
            phrase_key: String::new(),
            default_translation: String::new(),
            description: None,
            screenshot: None,
            namespace: None,
            translations: catalog.blank_translations(),
        }
    }

    /// Keeps exactly one slot per catalog code: unknown codes are dropped and
    /// missing ones are added blank.
    pub fn normalize(&mut self, catalog: &LanguageCatalog) {
        self.translations.retain(|code, _| catalog.contains(code));
        for code in catalog.codes() {
            self.translations.entry(code.to_string()).or_default();
        }
    }

    pub fn has_missing_translation(&self) -> bool {
        self.translations.values().any(|t| t.trim().is_empty())
    }

    pub fn apply(&mut self, patch: &PhrasePatch) {
        if let Some(v) = &patch.phrase_key {
            self.phrase_key.clone_from(v);
        }
        if let Some(v) = &patch.default_translation {
            self.default_translation.clone_from(v);
        }
        if let Some(v) = &patch.description {
            self.description.clone_from(v);
        }
        if let Some(v) = &patch.screenshot {
            self.screenshot.clone_from(v);
        }
        if let Some(ns) = patch.namespace {
            self.namespace = ns;
        }
        if let Some(map) = &patch.translations {
            for (code, text) in map {
                self.translations.insert(code.clone(), text.clone());
            }
        }
    }
}

/// Partial field update. Absent fields are left untouched.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PhrasePatch {
    #[serde(default, alias = "phraseKey")]
    pub phrase_key: Option<String>,

    #[serde(default, alias = "defaultTranslation")]
    pub default_translation: Option<String>,

    #[serde(default, deserialize_with = "patch_optional")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "patch_optional")]
    pub screenshot: Option<Option<String>>,

    #[serde(default, deserialize_with = "patch_namespace")]
    pub namespace: Option<Option<Namespace>>,

    #[serde(default)]
    pub translations: Option<BTreeMap<String, String>>,
}
