//! Lookup seam and error type shared by the reference tables.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error loading a reference table.
#[derive(Debug, Error)]
pub enum RefdataError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("reference data is missing column {0:?}")]
    MissingColumn(String),
    #[error("failed to read reference data: {0}")]
    Csv(#[from] csv::Error),
}

/// Resolves reference ids to display names and page URLs.
///
/// Ids may be bare keys (`local-authority-eng:HAG`, `E04001234`) or
/// slugs with a leading `/`; implementations decide how slugs map onto
/// their keys.
pub trait Lookup {
    /// Display name for `id`, when the table knows one.
    fn name_for(&self, id: &str) -> Option<String>;

    /// Page URL for `id`, when the table knows the id and has a URL
    /// scheme at all.
    fn url_for(&self, id: &str) -> Option<String>;
}
