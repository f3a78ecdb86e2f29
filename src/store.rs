//! Filesystem access for the snippet tree.
//!
//! Every read of the snippet tree goes through [`DocumentStore`]. Nothing is
//! cached: each probe lists the directory again and each load re-reads and
//! re-parses the file.

use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of every snippet document
pub const SNIPPET_FILE_EXTENSION: &str = ".json";

/// What a candidate name is inside a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// A sub-directory with that name exists
    Directory,
    /// A document file `<name>.json` exists
    File,
    /// Neither, or the directory could not be read
    Error,
}

/// Reasons a document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only view of the snippet tree under a root directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/<relative>`, built by concatenation so `relative` can never replace the root.
    pub fn path_under_root(&self, relative: &str) -> PathBuf {
        let mut path: OsString = self.root.clone().into_os_string();
        path.push("/");
        path.push(relative);
        PathBuf::from(path)
    }

    /// `<root>/<relative>.json`
    pub fn document_path(&self, relative: &str) -> PathBuf {
        let mut path = self.path_under_root(relative).into_os_string();
        path.push(SNIPPET_FILE_EXTENSION);
        PathBuf::from(path)
    }

    /// Classify `candidate` inside `<root>/<directory>`.
    ///
    /// A sub-directory named `candidate` wins over a file `candidate.json`.
    pub fn probe(&self, directory: &str, candidate: &str) -> ProbeResult {
        let path = self.path_under_root(directory);
        let entries = match std::fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {}: {}", path.display(), e);
                return ProbeResult::Error;
            }
        };

        let file_name = format!("{}{}", candidate, SNIPPET_FILE_EXTENSION);
        let mut found_file = false;

        for entry in entries.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let name = entry.file_name();
            if is_dir && name == candidate {
                return ProbeResult::Directory;
            }
            if !is_dir && name == file_name.as_str() {
                found_file = true;
            }
        }

        if found_file {
            ProbeResult::File
        } else {
            ProbeResult::Error
        }
    }

    /// Read and parse the document at `path`.
    pub fn load(&self, path: &Path) -> Result<Value, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a document, collapsing every failure into `None`.
    pub fn load_or_skip(&self, path: &Path) -> Option<Value> {
        match self.load(path) {
            Ok(document) => Some(document),
            Err(e) => {
                debug!("Skipping document: {}", e);
                None
            }
        }
    }
}
