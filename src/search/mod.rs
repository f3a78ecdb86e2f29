//! Search strategies that locate one translation for one language.
//!
//! Both strategies answer `Some(translation)` or `None`. Missing files,
//! malformed documents, missing keys and non-string values all end as `None`.

mod dynamic;
mod strict;

pub use dynamic::DynamicSearch;
pub use strict::StrictSearch;

use serde_json::Value;

/// A key was looked up on a string, number, boolean or null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NotAContainer;

/// Look up `key` below `node`.
///
/// Objects are indexed by key and arrays by decimal position. Scalars have no
/// children at all, which is reported separately from a missing key.
pub(crate) fn child<'v>(node: &'v Value, key: &str) -> Result<Option<&'v Value>, NotAContainer> {
    match node {
        Value::Object(map) => Ok(map.get(key)),
        Value::Array(items) => Ok(key.parse::<usize>().ok().and_then(|i| items.get(i))),
        _ => Err(NotAContainer),
    }
}

/// Optional language step: descend into `language` when `node` has it.
pub(crate) fn language_child<'v>(node: &'v Value, language: &str) -> Option<&'v Value> {
    child(node, language).ok().flatten()
}

/// Only string leaves are translations.
pub(crate) fn as_translation(node: &Value) -> Option<String> {
    node.as_str().map(str::to_owned)
}
