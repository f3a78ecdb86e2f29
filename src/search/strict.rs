use crate::search::{as_translation, child, language_child};
use crate::store::{DocumentStore, ProbeResult};
use tracing::debug;

/// Strict layout: `dir.path.file:key.path`.
///
/// The part before the strict separator names the document (the last segment
/// may also be a directory holding one file per language), the part after it
/// is the key path inside that document.
#[derive(Debug, Clone, Copy)]
pub struct StrictSearch<'a> {
    store: &'a DocumentStore,
    separator: &'a str,
    strict_separator: &'a str,
}

/// Where the document for a tag lives and whether the language was already used to find it.
struct Located {
    relative: String,
    language_consumed: bool,
}

impl<'a> StrictSearch<'a> {
    pub fn new(store: &'a DocumentStore, separator: &'a str, strict_separator: &'a str) -> Self {
        Self {
            store,
            separator,
            strict_separator,
        }
    }

    pub fn search(&self, tag: &str, language: &str) -> Option<String> {
        let (directory_path, json_path) = tag.split_once(self.strict_separator)?;
        if directory_path.is_empty() || json_path.is_empty() {
            return None;
        }

        let mut steps: Vec<&str> = directory_path.split(self.separator).collect();
        let leaf = steps.pop()?;
        let base = steps.join("/");

        let Located {
            relative,
            mut language_consumed,
        } = self.locate(&base, leaf, language)?;

        let document = self.store.load_or_skip(&self.store.document_path(&relative))?;
        let mut node = &document;

        if !language_consumed {
            if let Some(next) = language_child(node, language) {
                node = next;
                language_consumed = true;
            }
        }

        for key in json_path.split(self.separator) {
            match child(node, key) {
                Ok(Some(next)) => node = next,
                Ok(None) => break,
                Err(_) => {
                    debug!("'{}' descends into a scalar at key '{}'", tag, key);
                    return None;
                }
            }
        }

        if !language_consumed {
            if let Some(next) = language_child(node, language) {
                node = next;
            }
        }

        as_translation(node)
    }

    fn locate(&self, base: &str, leaf: &str, language: &str) -> Option<Located> {
        match self.store.probe(base, leaf) {
            ProbeResult::Directory => Some(Located {
                relative: nested(&nested(base, leaf), language),
                language_consumed: true,
            }),
            ProbeResult::File => Some(Located {
                relative: nested(base, leaf),
                language_consumed: false,
            }),
            ProbeResult::Error => {
                let prefixed = nested(language, base);
                if self.store.probe(&prefixed, leaf) != ProbeResult::File {
                    debug!("No document for '{}' under {} or {}", leaf, base, prefixed);
                    return None;
                }
                Some(Located {
                    relative: nested(&prefixed, leaf),
                    language_consumed: true,
                })
            }
        }
    }
}

/// `base/name`, or just `name` at the root.
fn nested(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn search(root: &Path, tag: &str, language: &str) -> Option<String> {
        let store = DocumentStore::new(root);
        StrictSearch::new(&store, ".", ":").search(tag, language)
    }

    // ==================== Layout Tests ====================

    #[test]
    fn test_leaf_is_file_with_language_key() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c": "X"}}"#);

        assert_eq!(search(dir.path(), "a.b:c", "en"), Some("X".to_string()));
    }

    #[test]
    fn test_language_key_below_json_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"c": {"en": "X", "de": "Y"}}"#);

        assert_eq!(search(dir.path(), "a.b:c", "de"), Some("Y".to_string()));
    }

    #[test]
    fn test_leaf_is_directory_of_language_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b/de.json", r#"{"c": "Hallo"}"#);

        assert_eq!(search(dir.path(), "a.b:c", "de"), Some("Hallo".to_string()));
    }

    #[test]
    fn test_language_directory_prefix() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "fr/a/b.json", r#"{"c": "Bonjour"}"#);

        assert_eq!(search(dir.path(), "a.b:c", "fr"), Some("Bonjour".to_string()));
    }

    #[test]
    fn test_top_level_document() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "common.json", r#"{"en": {"yes": "Yes"}}"#);

        assert_eq!(search(dir.path(), "common:yes", "en"), Some("Yes".to_string()));
    }

    #[test]
    fn test_directory_layout_skips_language_key_in_document() {
        let dir = TempDir::new().unwrap();
        // The language was taken from the file name, so the inner "de" key stays unused
        write(dir.path(), "a/b/de.json", r#"{"de": {"c": "inner"}, "c": "outer"}"#);

        assert_eq!(search(dir.path(), "a.b:c", "de"), Some("outer".to_string()));
    }

    // ==================== Tag Shape Tests ====================

    #[test]
    fn test_tag_without_strict_separator() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c": "X"}}"#);

        assert_eq!(search(dir.path(), "a.b.c", "en"), None);
    }

    #[test]
    fn test_tag_with_empty_parts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c": "X"}}"#);

        assert_eq!(search(dir.path(), ":c", "en"), None);
        assert_eq!(search(dir.path(), "a.b:", "en"), None);
    }

    #[test]
    fn test_extra_strict_separators_belong_to_json_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c:d": "colon key"}}"#);

        assert_eq!(search(dir.path(), "a.b:c:d", "en"), Some("colon key".to_string()));
    }

    // ==================== Descent Tests ====================

    #[test]
    fn test_missing_key_stops_descent() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c": "X"}}"#);

        // "missing" stops the walk at the "en" object, which is not a string
        assert_eq!(search(dir.path(), "a.b:missing.c", "en"), None);
    }

    #[test]
    fn test_language_applied_after_stopped_descent() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"c": {"en": "X"}}"#);

        // "zz" is missing, so the walk stops at "c" and the language key is taken from there
        assert_eq!(search(dir.path(), "a.b:c.zz", "en"), Some("X".to_string()));
    }

    #[test]
    fn test_descent_into_scalar_is_not_found() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c": "X"}}"#);

        assert_eq!(search(dir.path(), "a.b:c.d", "en"), None);
    }

    #[test]
    fn test_non_string_value_is_not_found() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c": 42, "d": ["x"]}}"#);

        assert_eq!(search(dir.path(), "a.b:c", "en"), None);
        assert_eq!(search(dir.path(), "a.b:d", "en"), None);
    }

    #[test]
    fn test_missing_document_and_broken_json() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", "{ broken");

        assert_eq!(search(dir.path(), "a.b:c", "en"), None);
        assert_eq!(search(dir.path(), "x.y:c", "en"), None);
    }

    #[test]
    fn test_custom_separators() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b.json", r#"{"en": {"c": {"d": "X"}}}"#);
        let store = DocumentStore::new(dir.path());

        let result = StrictSearch::new(&store, "/", "#").search("a/b#c/d", "en");
        assert_eq!(result, Some("X".to_string()));
    }

    #[test]
    fn test_nested() {
        assert_eq!(nested("", "b"), "b");
        assert_eq!(nested("a/x", "b"), "a/x/b");
        assert_eq!(nested("fr", ""), "fr");
    }
}
