use crate::search::{as_translation, child, language_child};
use crate::store::DocumentStore;
use tracing::{debug, trace};

/// Dynamic layout: any prefix of the tag may name the document.
///
/// Tries every split of the tag into a file path prefix and an in-document key
/// suffix, and every point at which the language can appear as an extra path
/// segment instead of a document key.
#[derive(Debug, Clone, Copy)]
pub struct DynamicSearch<'a> {
    store: &'a DocumentStore,
    separator: &'a str,
}

/// One branch of the backtracking search.
///
/// `consumed` joined by `/` names the candidate document; `remaining` are the
/// keys still to be resolved inside it.
#[derive(Debug, Clone)]
struct SearchState<'t> {
    remaining: &'t [&'t str],
    consumed: Vec<&'t str>,
    language_consumed: bool,
}

impl<'t> SearchState<'t> {
    fn start(segments: &'t [&'t str]) -> Self {
        Self {
            remaining: segments,
            consumed: Vec::new(),
            language_consumed: false,
        }
    }

    /// Branch where the language is the next path segment.
    fn with_language_segment(&self, language: &'t str) -> Self {
        let mut consumed = self.consumed.clone();
        consumed.push(language);
        Self {
            remaining: self.remaining,
            consumed,
            language_consumed: true,
        }
    }

    /// Branch where the next tag segment moves from the key path into the file path.
    fn advance(&self) -> Option<Self> {
        let (&next, rest) = self.remaining.split_first()?;
        let mut consumed = self.consumed.clone();
        consumed.push(next);
        Some(Self {
            remaining: rest,
            consumed,
            language_consumed: self.language_consumed,
        })
    }
}

impl<'a> DynamicSearch<'a> {
    pub fn new(store: &'a DocumentStore, separator: &'a str) -> Self {
        Self { store, separator }
    }

    pub fn search(&self, tag: &str, language: &str) -> Option<String> {
        let segments: Vec<&str> = tag.split(self.separator).collect();
        let found = self.seek(SearchState::start(&segments), language);
        if found.is_none() {
            debug!("No dynamic match for '{}' in language '{}'", tag, language);
        }
        found
    }

    fn seek<'t>(&self, state: SearchState<'t>, language: &'t str) -> Option<String> {
        if let Some(found) = self.attempt(&state, language) {
            return Some(found);
        }

        if !state.language_consumed {
            if let Some(found) = self.seek(state.with_language_segment(language), language) {
                return Some(found);
            }
        }

        self.seek(state.advance()?, language)
    }

    /// Resolve all remaining segments inside the document named by `consumed`.
    fn attempt(&self, state: &SearchState<'_>, language: &str) -> Option<String> {
        let path = self.store.document_path(&state.consumed.join("/"));
        trace!("Probing {} for {:?}", path.display(), state.remaining);

        let document = self.store.load_or_skip(&path)?;
        let mut node = &document;
        let mut language_consumed = state.language_consumed;

        for segment in state.remaining {
            if !language_consumed {
                if let Some(next) = language_child(node, language) {
                    node = next;
                    language_consumed = true;
                }
            }
            node = child(node, segment).ok().flatten()?;
        }

        if !language_consumed {
            if let Some(next) = language_child(node, language) {
                node = next;
            }
        }

        as_translation(node)
    }
}
