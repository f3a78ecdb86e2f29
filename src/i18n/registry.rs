//! Language registry: the configured languages and their fallback pointers.
//!
//! The registry is built once from a [`Config`] and is immutable afterwards,
//! so it can be shared freely between resolutions.

use crate::config::{Config, LanguageConfig};

/// Configured languages, fallback pointers and the default language.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    default_language: Option<String>,
}

impl LanguageRegistry {
    /// Build a registry from a list of languages and an optional default.
    ///
    /// Fallbacks naming an unknown identifier are dropped, as is a default
    /// language that is not one of `languages`.
    pub fn new(languages: Vec<LanguageConfig>, default_language: Option<String>) -> Self {
        let known: Vec<String> = languages.iter().map(|l| l.identifier.clone()).collect();

        let languages = languages
            .into_iter()
            .map(|lang| LanguageConfig {
                fallback: lang.fallback.filter(|fallback| known.contains(fallback)),
                identifier: lang.identifier,
            })
            .collect();

        let default_language = default_language.filter(|default| known.contains(default));

        Self {
            languages,
            default_language,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.languages.clone(), config.default_language.clone())
    }

    /// Get a language configuration by its identifier.
    pub fn get(&self, identifier: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.identifier == identifier)
    }

    /// All identifiers in configured order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|lang| lang.identifier.as_str())
    }

    /// The language to try after `identifier`, if any.
    pub fn fallback_of(&self, identifier: &str) -> Option<&str> {
        self.get(identifier)?.fallback.as_deref()
    }

    pub fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref()
    }
}
