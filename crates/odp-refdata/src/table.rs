//! Generic CSV-backed reference tables.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use odp_site::{GroupNames, last_segment};

use crate::lookup::{Lookup, RefdataError};

/// Normalisation applied to key-column values at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyFilter {
    /// Keys are stored as found.
    #[default]
    None,
    /// Keep the part after the last `:`, turning curies such as
    /// `parish:E04001234` into bare codes.
    AfterLastColon,
}

impl KeyFilter {
    fn apply(self, key: &str) -> &str {
        match self {
            Self::None => key,
            Self::AfterLastColon => key.rsplit_once(':').map_or(key, |(_, tail)| tail),
        }
    }
}

/// Shape of one reference CSV: which columns hold keys and display
/// values, and how URLs derive from them.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Column holding the lookup key.
    pub key_column: String,
    /// Column holding the display value, `name` by convention.
    pub value_column: String,
    /// Key normalisation applied at load time.
    pub key_filter: KeyFilter,
    /// Column holding the row's slug. When set, rows are also
    /// addressable by the slug's final segment.
    pub slug_column: Option<String>,
    /// Page URL template over `{key}` (the resolved table key) and
    /// `{id}` (the id exactly as passed in).
    pub url_pattern: Option<String>,
    /// Geometry URL template, same placeholders.
    pub geometry_url_pattern: Option<String>,
}

impl TableConfig {
    #[must_use]
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            value_column: "name".to_owned(),
            key_filter: KeyFilter::None,
            slug_column: None,
            url_pattern: None,
            geometry_url_pattern: None,
        }
    }
}

/// An in-memory reference table loaded from one CSV file.
///
/// Values are stored verbatim, including empty ones, so containment
/// sees every keyed row; name lookups treat empty values as absent.
/// Lookup ids with a leading `/` are resolved to their final segment
/// before the key lookup.
#[derive(Debug)]
pub struct ReferenceTable {
    config: TableConfig,
    values: BTreeMap<String, String>,
}

impl ReferenceTable {
    pub fn from_csv_path(
        config: TableConfig,
        path: impl AsRef<Path>,
    ) -> Result<Self, RefdataError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RefdataError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(config, file)
    }

    pub fn from_reader(config: TableConfig, reader: impl Read) -> Result<Self, RefdataError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| RefdataError::MissingColumn(name.to_owned()))
        };

        let key_column = column(&config.key_column)?;
        let value_column = column(&config.value_column)?;
        let slug_column = config.slug_column.as_deref().map(column).transpose()?;

        let mut values = BTreeMap::new();
        for record in csv_reader.records() {
            let record = record?;
            let Some(key) = record.get(key_column) else {
                continue;
            };
            let key = config.key_filter.apply(key);
            if key.is_empty() {
                continue;
            }
            let value = record.get(value_column).unwrap_or_default();
            values.insert(key.to_owned(), value.to_owned());

            // keyed entries win over slug-derived ones
            if let Some(column) = slug_column
                && let Some(slug) = record.get(column)
                && !slug.is_empty()
            {
                values
                    .entry(last_segment(slug).to_owned())
                    .or_insert_with(|| value.to_owned());
            }
        }

        Ok(Self { config, values })
    }

    fn resolve_key(id: &str) -> &str {
        if id.starts_with('/') { last_segment(id) } else { id }
    }

    /// Whether the table has a row for `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(Self::resolve_key(id))
    }

    /// Display value for `id`; empty values read as absent.
    #[must_use]
    pub fn name_for(&self, id: &str) -> Option<&str> {
        self.values
            .get(Self::resolve_key(id))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Page URL for `id`, when the id is known and a pattern is set.
    #[must_use]
    pub fn url_for(&self, id: &str) -> Option<String> {
        self.expand(self.config.url_pattern.as_deref(), id)
    }

    /// Geometry URL for `id`, when the id is known and a pattern is set.
    #[must_use]
    pub fn geometry_url_for(&self, id: &str) -> Option<String> {
        self.expand(self.config.geometry_url_pattern.as_deref(), id)
    }

    fn expand(&self, pattern: Option<&str>, id: &str) -> Option<String> {
        let key = Self::resolve_key(id);
        if !self.values.contains_key(key) {
            return None;
        }
        pattern.map(|pattern| pattern.replace("{key}", key).replace("{id}", id))
    }

    /// Number of addressable keys, counting slug-derived aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Lookup for ReferenceTable {
    fn name_for(&self, id: &str) -> Option<String> {
        ReferenceTable::name_for(self, id).map(ToOwned::to_owned)
    }

    fn url_for(&self, id: &str) -> Option<String> {
        ReferenceTable::url_for(self, id)
    }
}

/// The organisation register, keyed by curie
/// (`local-authority-eng:HAG`) and addressable by slug.
///
/// Doubles as the group-label source for grouped rendering.
#[derive(Debug)]
pub struct OrganisationTable {
    table: ReferenceTable,
}

impl OrganisationTable {
    fn config() -> TableConfig {
        let mut config = TableConfig::new("organisation");
        config.slug_column = Some("slug".to_owned());
        config
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, RefdataError> {
        Ok(Self {
            table: ReferenceTable::from_csv_path(Self::config(), path)?,
        })
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, RefdataError> {
        Ok(Self {
            table: ReferenceTable::from_reader(Self::config(), reader)?,
        })
    }

    /// Organisation name for a curie or slug id.
    #[must_use]
    pub fn name_for(&self, id: &str) -> Option<&str> {
        self.table.name_for(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Lookup for OrganisationTable {
    fn name_for(&self, id: &str) -> Option<String> {
        OrganisationTable::name_for(self, id).map(ToOwned::to_owned)
    }

    fn url_for(&self, _id: &str) -> Option<String> {
        None
    }
}

impl GroupNames for OrganisationTable {
    fn name_for(&self, id: &str) -> Option<String> {
        OrganisationTable::name_for(self, id).map(ToOwned::to_owned)
    }
}
