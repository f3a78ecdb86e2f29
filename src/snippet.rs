use crate::config::{Config, ConfigError, ProvidedConfig};
use crate::resolver::TranslationResolver;
use serde::Serialize;
use std::collections::BTreeMap;

/// Every direct translation of one snippet tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetTranslations {
    pub snippet_tag: String,

    /// Language identifier -> translation, for languages that have one
    pub translations: BTreeMap<String, String>,
}

/// Entry point combining configuration, resolution and variable substitution.
#[derive(Debug)]
pub struct Snippet {
    config: Config,
    resolver: TranslationResolver,
}

impl Snippet {
    pub fn new(config: Config) -> Self {
        let resolver = TranslationResolver::new(&config);
        Self { config, resolver }
    }

    /// Load configuration from the environment file and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }

    /// Like [`Snippet::from_env`], with caller-supplied values taking precedence.
    pub fn with_config(provided: ProvidedConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Config::load(provided)?))
    }

    /// Translate `tag`, following language fallbacks, and fill in `variables`.
    ///
    /// # Example
    /// ```ignore
    /// let text = snippet.translate("mail.greeting", Some("de"), &[("name", "Ada")]);
    /// ```
    pub fn translate(
        &self,
        tag: &str,
        language: Option<&str>,
        variables: &[(&str, &str)],
    ) -> Option<String> {
        self.resolver
            .resolve(tag, language)
            .map(|translation| self.replace_variables(&translation, variables))
    }

    /// Collect the translation of `tag` in every configured language.
    ///
    /// Fallbacks are not followed; languages without their own translation
    /// are left out.
    pub fn snippet(&self, tag: &str) -> SnippetTranslations {
        let translations = self
            .resolver
            .registry()
            .identifiers()
            .filter_map(|language| {
                self.resolver
                    .search(tag, language)
                    .map(|translation| (language.to_string(), translation))
            })
            .collect();

        SnippetTranslations {
            snippet_tag: tag.to_string(),
            translations,
        }
    }

    /// Replace the first occurrence of each `start + name + end` placeholder, in order.
    pub fn replace_variables(&self, text: &str, variables: &[(&str, &str)]) -> String {
        replace_variables(
            text,
            variables,
            &self.config.variable_indicator_start,
            &self.config.variable_indicator_end,
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &TranslationResolver {
        &self.resolver
    }
}

pub fn replace_variables(text: &str, variables: &[(&str, &str)], start: &str, end: &str) -> String {
    variables
        .iter()
        .fold(text.to_string(), |text, (name, value)| {
            text.replacen(&format!("{}{}{}", start, name, end), value, 1)
        })
}
