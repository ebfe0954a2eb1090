//! File-writing sink: one standalone HTML page per render context.

use std::fs;
use std::path::Path;

use odp_refdata::Lookup;
use odp_site::{IndexContext, RenderSink, RowContext, SinkError};

use crate::page::{self, FieldLookups};

/// Render sink that writes GOV.UK-styled pages straight to disk.
///
/// One HTML file per detail or index context, at exactly the path the
/// engine asks for, with parent directories created on the way.
/// Reference-valued fields can be routed through a [`Lookup`] so
/// detail tables show display names and page links instead of raw ids.
pub struct HtmlSink {
    lookups: FieldLookups,
}

impl HtmlSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lookups: FieldLookups::new(),
        }
    }

    /// Resolve values of `field` through `lookup` on detail pages.
    #[must_use]
    pub fn with_lookup(mut self, field: impl Into<String>, lookup: impl Lookup + 'static) -> Self {
        self.lookups.insert(field.into(), Box::new(lookup));
        self
    }

    /// Markup for one detail page, without writing anything.
    #[must_use]
    pub fn row_html(&self, context: &RowContext) -> String {
        page::row_page(context, &self.lookups)
    }

    /// Markup for one index page, without writing anything.
    #[must_use]
    pub fn index_html(&self, context: &IndexContext) -> String {
        page::index_page(context)
    }
}

impl Default for HtmlSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for HtmlSink {
    fn render_row(&mut self, path: &Path, context: &RowContext) -> Result<(), SinkError> {
        write_page(path, &self.row_html(context))
    }

    fn render_index(&mut self, path: &Path, context: &IndexContext) -> Result<(), SinkError> {
        write_page(path, &self.index_html(context))
    }
}

fn write_page(path: &Path, html: &str) -> Result<(), SinkError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SinkError::io(parent, e))?;
    }
    fs::write(path, html).map_err(|e| SinkError::io(path, e))
}
