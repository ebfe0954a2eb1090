//! Dataset configuration.
//!
//! Parses per-dataset TOML files with serde. A config names the dataset,
//! points the engine at an output root, and carries the optional knobs:
//! grouping field, key field, download base, row cap, and the naming
//! rule for datasets without a usable `name` column.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::row::Row;
use crate::slug;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("configuration error: {0}")]
    Validation(String),
    /// Grouping requested on a field with no label source.
    #[error("unsupported group field {0:?}: only \"organisation\" has a name register")]
    UnsupportedGroupField(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// How a row's display name is derived.
///
/// Most datasets carry a `name` column; a few only have a type and a
/// cross-reference, and synthesize a name from those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RowNaming {
    /// `name` column, falling back to the key field.
    #[default]
    Default,
    /// `"{type_field value} {reference_field value}"`, falling back to
    /// the default chain when either field is empty.
    Synthesized {
        type_field: String,
        reference_field: String,
    },
}

impl RowNaming {
    /// Display name for `row` under this rule.
    #[must_use]
    pub fn display_name(&self, row: &Row, key_field: &str) -> Option<String> {
        let fallback =
            |row: &Row| row.get("name").or_else(|| row.get(key_field)).map(ToOwned::to_owned);
        match self {
            Self::Default => fallback(row),
            Self::Synthesized {
                type_field,
                reference_field,
            } => match (row.get(type_field), row.get(reference_field)) {
                (Some(type_value), Some(reference)) => Some(format!("{type_value} {reference}")),
                _ => fallback(row),
            },
        }
    }
}

/// Per-dataset render configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Data type name passed through to page contexts.
    pub name: String,
    /// Dataset id: names the download file and defaults the key field.
    pub dataset: String,
    /// Column holding each row's reference; defaults to the dataset id.
    pub key_field: Option<String>,
    /// Field to group the root index by; only `organisation` is
    /// supported.
    pub group_field: Option<String>,
    /// Output root for rendered pages.
    pub docs: PathBuf,
    /// Base URL for the root page's download link; when unset the root
    /// page carries no download link.
    pub download_base: Option<String>,
    /// Cap on input rows per render pass.
    pub limit: Option<usize>,
    /// Row display-name rule.
    pub naming: RowNaming,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            dataset: String::new(),
            key_field: None,
            group_field: None,
            docs: PathBuf::from("docs"),
            download_base: None,
            limit: None,
            naming: RowNaming::default(),
        }
    }
}

impl DatasetConfig {
    /// Minimal config for a dataset, grouping disabled.
    #[must_use]
    pub fn new(name: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dataset: dataset.into(),
            ..Self::default()
        }
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field contents.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.name, "name")?;
        require_non_empty(&self.dataset, "dataset")?;
        if let Some(key_field) = &self.key_field {
            require_non_empty(key_field, "key_field")?;
        }
        if let Some(base) = &self.download_base {
            require_http_url(base, "download_base")?;
        }
        match self.group_field.as_deref() {
            None | Some("organisation") => Ok(()),
            Some(other) => Err(ConfigError::UnsupportedGroupField(other.to_owned())),
        }
    }

    /// The column holding each row's reference.
    #[must_use]
    pub fn key_field(&self) -> &str {
        self.key_field.as_deref().unwrap_or(&self.dataset)
    }

    /// Canonical raw-file location for the whole dataset, shown on the
    /// root index page.
    #[must_use]
    pub fn download_url(&self) -> Option<String> {
        self.download_base
            .as_deref()
            .map(|base| {
                let base = base.strip_suffix('/').unwrap_or(base);
                format!("{base}/{dataset}/{dataset}.csv", dataset = self.dataset)
            })
    }

    /// Display name for `row` under the configured naming rule.
    #[must_use]
    pub fn row_name(&self, row: &Row) -> Option<String> {
        self.naming.display_name(row, self.key_field())
    }

    /// Reference for `row`: the key field, falling back to the last
    /// slug segment.
    #[must_use]
    pub fn row_reference(&self, row: &Row, row_slug: &str) -> String {
        row.get(self.key_field())
            .map_or_else(|| slug::last_segment(row_slug).to_owned(), ToOwned::to_owned)
    }
}
