//! Language chain: the ordered languages to try for one resolution.

use crate::i18n::LanguageRegistry;
use std::collections::HashSet;

/// Lazy sequence of languages: the start language, its fallbacks, then the default.
///
/// Each language of the fallback walk is yielded at most once, so a cyclic
/// fallback graph terminates. The default language is always appended as the
/// final candidate, even when the walk already produced it.
#[derive(Debug)]
pub struct LanguageChain<'a> {
    registry: &'a LanguageRegistry,
    next: Option<&'a str>,
    visited: HashSet<&'a str>,
    default_pending: bool,
}

impl<'a> LanguageChain<'a> {
    pub fn new(registry: &'a LanguageRegistry, start: Option<&'a str>) -> Self {
        Self {
            registry,
            next: start,
            visited: HashSet::new(),
            default_pending: true,
        }
    }
}

impl<'a> Iterator for LanguageChain<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if let Some(current) = self.next.take() {
            if self.visited.insert(current) {
                self.next = self.registry.fallback_of(current);
                return Some(current);
            }
        }

        if self.default_pending {
            self.default_pending = false;
            return self.registry.default_language();
        }

        None
    }
}
