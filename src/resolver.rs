use crate::config::{Config, SearchMode};
use crate::i18n::{LanguageChain, LanguageRegistry, ResolutionMetrics};
use crate::search::{DynamicSearch, StrictSearch};
use crate::store::DocumentStore;
use tracing::debug;

/// Resolves snippet tags by walking the language chain.
///
/// Holds only read-only state besides its counters, so one resolver can
/// serve concurrent lookups.
#[derive(Debug)]
pub struct TranslationResolver {
    store: DocumentStore,
    registry: LanguageRegistry,
    search_mode: SearchMode,
    separator: String,
    strict_separator: String,
    metrics: ResolutionMetrics,
}

impl TranslationResolver {
    pub fn new(config: &Config) -> Self {
        Self::with_registry(config, LanguageRegistry::from_config(config))
    }

    pub fn with_registry(config: &Config, registry: LanguageRegistry) -> Self {
        Self {
            store: DocumentStore::new(&config.root_path),
            registry,
            search_mode: config.search_mode,
            separator: config.separator.clone(),
            strict_separator: config.strict_separator.clone(),
            metrics: ResolutionMetrics::new(),
        }
    }

    /// Find a translation for `tag`, starting at `language` and following fallbacks.
    ///
    /// Tries `language`, its fallback chain, then the default language, and
    /// returns the first translation found. Without a start language only the
    /// default language is tried.
    pub fn resolve(&self, tag: &str, language: Option<&str>) -> Option<String> {
        for (position, candidate) in LanguageChain::new(&self.registry, language).enumerate() {
            if let Some(translation) = self.search(tag, candidate) {
                if position > 0 {
                    debug!("Resolved '{}' via fallback language '{}'", tag, candidate);
                }
                self.metrics.record_hit(position);
                return Some(translation);
            }
        }

        debug!("No translation for '{}' (requested {:?})", tag, language);
        self.metrics.record_miss();
        None
    }

    /// Find a translation for `tag` in exactly `language`, without fallbacks.
    pub fn search(&self, tag: &str, language: &str) -> Option<String> {
        match self.search_mode {
            SearchMode::Strict => {
                StrictSearch::new(&self.store, &self.separator, &self.strict_separator)
                    .search(tag, language)
            }
            SearchMode::Dynamic => {
                DynamicSearch::new(&self.store, &self.separator).search(tag, language)
            }
            SearchMode::Unconfigured => None,
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }
}
