//! Render-sink seam between the engine and a page-writing layer.
//!
//! The engine never renders markup itself. It hands fully-derived page
//! contexts to a [`RenderSink`], one call per output page, and the sink
//! decides what a page looks like and where bytes go. Sinks see paths
//! under the configured docs root, such as `docs/org-one/index.html`.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::group::IndexGroup;
use crate::index::IndexEntry;
use crate::row::Row;
use crate::slug::Crumb;

/// Error from a render-sink operation.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Other(String),
}

impl SinkError {
    /// Wrap an IO failure for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Context for one detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowContext {
    pub row: Row,
    pub breadcrumb: Vec<Crumb>,
    pub data_type: String,
}

/// Context for one index page.
///
/// The root page carries the dataset-level fields (`data_type`, the
/// download link, the configured group field, and the grouped or flat
/// listing). Sub-index pages carry their own listing and reference set
/// and leave the dataset-level fields empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    pub breadcrumb: Vec<Crumb>,
    pub count: usize,
    pub download_url: Option<String>,
    pub group_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<IndexGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<IndexEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<BTreeSet<String>>,
}

/// Consumes rendered page contexts and produces output pages.
///
/// Both operations are side effects with no partial-success contract: a
/// sink either writes the page or reports why it could not.
pub trait RenderSink {
    /// Write the detail page for one row.
    fn render_row(&mut self, path: &Path, context: &RowContext) -> Result<(), SinkError>;

    /// Write one index page.
    fn render_index(&mut self, path: &Path, context: &IndexContext) -> Result<(), SinkError>;
}
