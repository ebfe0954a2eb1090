//! Render orchestration.
//!
//! One render pass streams every row once, building the group index and
//! the path index while emitting a detail page (and possibly a geometry
//! sidecar) per row, then walks the accumulated index in a second pass
//! and emits one index page per path node plus the root page.
//!
//! All pass state lives in [`Renderer::render`] and is rebuilt per call;
//! a renderer can run any number of passes over different row sets.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::{ConfigError, DatasetConfig};
use crate::geometry::{self, GEOMETRY_FIELDS};
use crate::group::{GroupIndex, GroupNames, group_keys};
use crate::index::{EntrySeed, LinkTarget, PathIndex, RawEntry};
use crate::row::Row;
use crate::sink::{IndexContext, RenderSink, RowContext, SinkError};
use crate::slug::{slug_to_breadcrumb, strip_slug_prefix};

/// Error from a render pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Leading slug elements that identify the dataset: the empty element
/// from the leading `/` plus the dataset-name element. Everything after
/// them is the row's path under the docs root.
const SLUG_PREFIX_ELEMENTS: usize = 2;

/// Drives the per-row pass and the index-page pass against one sink.
pub struct Renderer<S> {
    config: DatasetConfig,
    names: Option<Box<dyn GroupNames>>,
    sink: S,
}

impl<S: RenderSink> Renderer<S> {
    /// Build a renderer over `sink`.
    ///
    /// Fails when the config is invalid; in particular a group field
    /// without a label source is rejected here rather than mid-pass.
    pub fn new(config: DatasetConfig, sink: S) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            config,
            names: None,
            sink,
        })
    }

    /// Attach a group-label lookup, normally an organisation register.
    #[must_use]
    pub fn with_group_names(mut self, names: impl GroupNames + 'static) -> Self {
        self.names = Some(Box::new(names));
        self
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the renderer, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Render every row, then the accumulated index pages.
    ///
    /// Rows without a slug are dropped silently. A duplicate slug is
    /// logged and processed anyway; its output overwrites the earlier
    /// write. Geometry failures are logged and never abort the pass.
    /// Sink failures do abort: there is no partial-output recovery
    /// beyond re-running the pass.
    pub fn render<I>(&mut self, rows: I) -> Result<(), RenderError>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut slugs: BTreeSet<String> = BTreeSet::new();
        let mut groups = GroupIndex::new();
        let mut index = PathIndex::new();

        let key_field = self.config.key_field().to_owned();
        let limit = self.config.limit.unwrap_or(usize::MAX);

        for mut row in rows.into_iter().take(limit) {
            let Some(slug) = row.slug().map(ToOwned::to_owned) else {
                continue;
            };

            let group_entry = RawEntry {
                reference: self.config.row_reference(&row, &slug),
                text: self.config.row_name(&row),
                end_date: row.get("end-date").map(ToOwned::to_owned),
                link: LinkTarget::PendingSlug(slug.clone()),
            };
            groups.add_row(
                &group_keys(&row, self.config.group_field.as_deref()),
                &slug,
                &group_entry,
            );

            if slugs.contains(&slug) {
                warn!(slug = %slug, "duplicate slug; page will be overwritten");
            }

            let breadcrumb = slug_to_breadcrumb(&slug, row.get(&key_field));
            let stripped = strip_slug_prefix(&slug, SLUG_PREFIX_ELEMENTS);
            let output_dir = self.config.docs.join(&stripped);

            if let Some(field) = GEOMETRY_FIELDS.iter().find(|f| row.get(f).is_some()) {
                match geometry::write_sidecar(&output_dir, &row, field) {
                    Ok(file) => row.insert("geometry_url", file),
                    Err(e) => {
                        warn!(slug = %slug, error = %e, "failed to write geometry sidecar");
                    }
                }
            }

            let seed = EntrySeed {
                reference: row.get(&key_field).map(ToOwned::to_owned),
                text: self.config.row_name(&row),
                end_date: row.get("end-date").map(ToOwned::to_owned),
            };

            let page = output_dir.join("index.html");
            debug!(path = %page.display(), "creating detail page");
            let context = RowContext {
                row,
                breadcrumb,
                data_type: self.config.name.clone(),
            };
            self.sink.render_row(&page, &context)?;

            index.add(&stripped, seed);
            slugs.insert(slug);
        }

        self.render_index_pages(&slugs, groups, &index)
    }

    /// Emit the root index page and one page per accumulated path node,
    /// resolving pending hrefs against each page's own path.
    fn render_index_pages(
        &mut self,
        slugs: &BTreeSet<String>,
        groups: GroupIndex,
        index: &PathIndex,
    ) -> Result<(), RenderError> {
        let dataset = self.config.dataset.clone();

        let mut root = IndexContext {
            data_type: Some(self.config.name.clone()),
            breadcrumb: slug_to_breadcrumb(&format!("/{dataset}"), None),
            count: slugs.len(),
            download_url: self.config.download_url(),
            group_field: self.config.group_field.clone(),
            groups: None,
            items: None,
            references: None,
        };
        if self.config.group_field.is_some() {
            root.groups = Some(groups.into_groups(self.names.as_deref(), &dataset));
        } else {
            root.items = Some(groups.into_items(&dataset));
        }

        let root_page = self.config.docs.join("index.html");
        debug!(path = %root_page.display(), "creating index page");
        self.sink.render_index(&root_page, &root)?;

        for (path, node) in index.iter() {
            let strip = format!("{dataset}/{path}");
            let context = IndexContext {
                data_type: None,
                breadcrumb: slug_to_breadcrumb(&format!("/{dataset}/{path}"), None),
                count: node.count,
                download_url: None,
                group_field: None,
                groups: None,
                items: Some(node.resolved_items(&strip)),
                references: Some(node.references.clone()),
            };

            let page: PathBuf = self.config.docs.join(path).join("index.html");
            debug!(path = %page.display(), "creating index page");
            self.sink.render_index(&page, &context)?;
        }
        Ok(())
    }
}
