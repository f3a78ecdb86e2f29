use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the JSON configuration file
pub const CONFIG_ENV_VAR: &str = "SNIPPET_CONFIG";

/// Configuration file used when `SNIPPET_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "snippet.config.json";

/// Placeholder standing for the variable name inside `variableIndicator`
pub const VARIABLE_PLACEHOLDER: &str = "var";

/// How a snippet tag is mapped onto the snippet tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// `directory.path:json.path` layout
    Strict,
    /// Backtracking over every file/key partition of the tag
    Dynamic,
    /// Any other configured value; every lookup reports "not found"
    #[serde(other)]
    Unconfigured,
}

/// Per-language settings as written in a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

/// A configured language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    pub identifier: String,
    pub fallback: Option<String>,
}

/// Partial configuration supplied by a caller or a configuration file.
///
/// Every field is optional; missing fields are taken from the next source
/// in line (caller, then environment file, then built-in defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvidedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet_root_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_indicator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<SearchMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_separation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    /// Identifier -> settings, kept in the order they were written
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_languages",
        deserialize_with = "deserialize_languages"
    )]
    pub languages: Option<Vec<(String, LanguageInfo)>>,
}

fn serialize_languages<S>(
    languages: &Option<Vec<(String, LanguageInfo)>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match languages {
        Some(languages) => serializer.collect_map(languages.iter().map(|(id, info)| (id, info))),
        None => serializer.serialize_none(),
    }
}

fn deserialize_languages<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<(String, LanguageInfo)>>, D::Error>
where
    D: Deserializer<'de>,
{
    // serde_json's preserve_order keeps the object in document order
    let Some(map) = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?
    else {
        return Ok(None);
    };

    map.into_iter()
        .map(|(identifier, info)| {
            serde_json::from_value(info)
                .map(|info| (identifier, info))
                .map_err(serde::de::Error::custom)
        })
        .collect::<Result<Vec<_>, D::Error>>()
        .map(Some)
}

impl ProvidedConfig {
    /// Read the configuration file named by `SNIPPET_CONFIG`.
    ///
    /// Falls back to `snippet.config.json` in the working directory. A missing
    /// or malformed file yields an empty configuration.
    pub fn from_env() -> Self {
        // Load .env file (ignored when absent)
        let _ = dotenvy::dotenv();

        let raw_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = match absolutize(Path::new(&raw_path)) {
            Ok(path) => path,
            Err(e) => {
                warn!("Cannot resolve configuration path {}: {}", raw_path, e);
                return Self::default();
            }
        };

        Self::from_file(&path).unwrap_or_default()
    }

    /// Parse a JSON configuration file, logging and discarding any failure.
    pub fn from_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No snippet configuration at {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(provided) => Some(provided),
            Err(e) => {
                warn!("Ignoring malformed snippet configuration {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Field-wise merge where values in `self` take precedence over `lower`.
    pub fn or(self, lower: ProvidedConfig) -> ProvidedConfig {
        ProvidedConfig {
            snippet_root_path: self.snippet_root_path.or(lower.snippet_root_path),
            variable_indicator: self.variable_indicator.or(lower.variable_indicator),
            search_mode: self.search_mode.or(lower.search_mode),
            separation_token: self.separation_token.or(lower.separation_token),
            strict_separation_token: self
                .strict_separation_token
                .or(lower.strict_separation_token),
            default_language: self.default_language.or(lower.default_language),
            languages: self.languages.or(lower.languages),
        }
    }
}

/// Errors that make a configuration unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyToken(&'static str),

    #[error("failed to determine working directory: {0}")]
    WorkingDirectory(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    // Snippet tree
    pub root_path: PathBuf,
    pub search_mode: SearchMode,

    // Tag splitting
    pub separator: String,
    pub strict_separator: String,

    // Variable substitution
    pub variable_indicator_start: String,
    pub variable_indicator_end: String,

    // Languages
    pub languages: Vec<LanguageConfig>,
    pub default_language: Option<String>,
}

impl Config {
    /// Load configuration from the environment file and built-in defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(ProvidedConfig::default())
    }

    /// Merge caller-supplied values over the environment file and defaults.
    pub fn load(provided: ProvidedConfig) -> Result<Self, ConfigError> {
        Self::from_sources(provided, ProvidedConfig::from_env())
    }

    /// Build a configuration from explicit sources, without touching the environment.
    pub fn from_sources(
        provided: ProvidedConfig,
        environment: ProvidedConfig,
    ) -> Result<Self, ConfigError> {
        let (default_start, default_end) = ("{{", "}}");

        let (variable_indicator_start, variable_indicator_end) = provided
            .variable_indicator
            .as_deref()
            .or(environment.variable_indicator.as_deref())
            .and_then(split_indicator)
            .unwrap_or_else(|| (default_start.to_string(), default_end.to_string()));

        let merged = provided.or(environment);

        let root_path = absolutize(Path::new(
            merged.snippet_root_path.as_deref().unwrap_or("snippets"),
        ))?;

        let separator = merged.separation_token.unwrap_or_else(|| ".".to_string());
        if separator.is_empty() {
            return Err(ConfigError::EmptyToken("separationToken"));
        }
        let strict_separator = merged
            .strict_separation_token
            .unwrap_or_else(|| ":".to_string());
        if strict_separator.is_empty() {
            return Err(ConfigError::EmptyToken("strictSeparationToken"));
        }

        let languages = merged
            .languages
            .unwrap_or_default()
            .into_iter()
            .map(|(identifier, info)| LanguageConfig {
                identifier,
                fallback: info.fallback,
            })
            .collect();

        Ok(Self {
            root_path,
            search_mode: merged.search_mode.unwrap_or(SearchMode::Dynamic),
            separator,
            strict_separator,
            variable_indicator_start,
            variable_indicator_end,
            languages,
            default_language: merged.default_language,
        })
    }
}

/// Split `"{{var}}"` into `("{{", "}}")`; anything without exactly one placeholder is rejected.
///
/// A bare `"var"` is valid and yields empty indicators.
fn split_indicator(indicator: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = indicator.split(VARIABLE_PLACEHOLDER).collect();
    match parts.as_slice() {
        [start, end] => Some((start.to_string(), end.to_string())),
        _ => None,
    }
}

fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
