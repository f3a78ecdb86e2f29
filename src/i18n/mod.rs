//! Language handling for snippet resolution.
//!
//! # Architecture
//!
//! - `registry`: the configured languages, their fallback pointers and the default language
//! - `chain`: the cycle-safe sequence of languages tried for one lookup
//! - `metrics`: lookup counters kept by each resolver
//!
//! # Example
//!
//! ```rust,ignore
//! use snippet_translator::i18n::{LanguageChain, LanguageRegistry};
//!
//! let registry = LanguageRegistry::from_config(&config);
//! for language in LanguageChain::new(&registry, Some("de-CH")) {
//!     // "de-CH", "de", ..., then the default language
//! }
//! ```

mod chain;
mod metrics;
mod registry;

pub use chain::LanguageChain;
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use registry::LanguageRegistry;
