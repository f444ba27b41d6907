use crate::config::CoreConfig;
use crate::services::cultures::CultureList;
use crate::services::manager::PhraseManager;

/// Everything one front-end connection works on.
#[derive(Debug)]
pub struct Session {
    pub phrases: PhraseManager,
    pub cultures: CultureList,
}

impl Session {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            phrases: PhraseManager::new(
                config.languages.clone(),
                config.page_size,
                config.page_size_options.clone(),
            ),
            cultures: CultureList::new(config.cultures.clone()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&CoreConfig::default())
    }
}
