use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::model::catalog::LanguageCatalog;
use crate::model::culture::{default_cultures, LanguageEntry};

fn default_page_size() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 25, 50]
}

/// Startup configuration, read from a JSON file. Every field is optional.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    #[serde(default)]
    pub languages: LanguageCatalog,

    #[serde(default = "default_cultures")]
    pub cultures: Vec<LanguageEntry>,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            languages: LanguageCatalog::default(),
            cultures: default_cultures(),
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

impl CoreConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let data = fs::read_to_string(p)?;
                serde_json::from_str::<CoreConfig>(&data)?
            }
            None => CoreConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(CoreError::config("languages must not be empty"));
        }
        if self.page_size_options.iter().any(|s| *s == 0) {
            return Err(CoreError::config("page_size_options must be positive"));
        }
        if !self.page_size_options.contains(&self.page_size) {
            return Err(CoreError::config(format!(
                "page_size {} is not one of {:?}",
                self.page_size, self.page_size_options
            )));
        }
        Ok(())
    }
}
