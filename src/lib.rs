//! File-backed snippet translations.
//!
//! A snippet tag such as `"mail.greeting"` is resolved against a tree of JSON
//! documents under a configured root, trying the requested language, its
//! fallbacks and finally the default language.
//!
//! ```rust,ignore
//! use snippet_translator::Snippet;
//!
//! let snippet = Snippet::from_env()?;
//! let text = snippet.translate("mail.greeting", Some("de"), &[("name", "Ada")]);
//! ```

pub mod config;
pub mod i18n;
pub mod resolver;
pub mod search;
pub mod snippet;
pub mod store;

pub use config::{Config, ConfigError, ProvidedConfig, SearchMode};
pub use resolver::TranslationResolver;
pub use snippet::{Snippet, SnippetTranslations};
