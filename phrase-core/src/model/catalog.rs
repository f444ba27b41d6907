use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogLanguage {
    pub code: String,

    #[serde(default)]
    pub name: String,
}

/// Languages a phrase can be translated into. Static for the session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct LanguageCatalog(Vec<CatalogLanguage>);

impl Default for LanguageCatalog {
    fn default() -> Self {
        LanguageCatalog(vec![
            lang("fr", "French"),
            lang("de", "German"),
            lang("es", "Spanish"),
            lang("ar", "Arabic"),
        ])
    }
}

fn lang(code: &str, name: &str) -> CatalogLanguage {
    CatalogLanguage {
        code: code.to_string(),
        name: name.to_string(),
    }
}

impl LanguageCatalog {
    pub fn new(languages: Vec<CatalogLanguage>) -> Self {
        LanguageCatalog(languages)
    }

    pub fn languages(&self) -> &[CatalogLanguage] {
        &self.0
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|l| l.code.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|l| l.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One empty translation per catalog code.
    pub fn blank_translations(&self) -> BTreeMap<String, String> {
        self.codes().map(|c| (c.to_string(), String::new())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_template_languages() {
        let catalog = LanguageCatalog::default();
        let codes: Vec<&str> = catalog.codes().collect();
        assert_eq!(codes, vec!["fr", "de", "es", "ar"]);

        let blank = catalog.blank_translations();
        assert_eq!(blank.len(), 4);
        assert!(blank.values().all(|v| v.is_empty()));
    }

    #[test]
    fn catalog_deserializes_from_plain_array() {
        let catalog: LanguageCatalog =
            serde_json::from_str(r#"[{"code":"it","name":"Italian"}]"#).unwrap();
        assert!(catalog.contains("it"));
        assert!(!catalog.contains("fr"));
    }
}
