//! Static-site engine for per-row open-data datasets.
//!
//! This crate provides:
//! - [`Renderer`]: one-pass render of a dataset into detail and index pages
//! - [`DatasetConfig`]: per-dataset settings loaded from TOML
//! - [`RenderSink`]: the seam between page contexts and page markup
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use odp_site::{DatasetConfig, Renderer, rows_from_csv_path};
//! # struct Sink;
//! # impl odp_site::RenderSink for Sink {
//! #     fn render_row(
//! #         &mut self,
//! #         _: &Path,
//! #         _: &odp_site::RowContext,
//! #     ) -> Result<(), odp_site::SinkError> {
//! #         Ok(())
//! #     }
//! #     fn render_index(
//! #         &mut self,
//! #         _: &Path,
//! #         _: &odp_site::IndexContext,
//! #     ) -> Result<(), odp_site::SinkError> {
//! #         Ok(())
//! #     }
//! # }
//! # let sink = Sink;
//! let config = DatasetConfig::load(Path::new("dataset.toml"))?;
//! let rows = rows_from_csv_path("dataset.csv")?;
//!
//! let mut renderer = Renderer::new(config, sink)?;
//! renderer.render(rows)?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod config;
pub(crate) mod geometry;
pub(crate) mod group;
pub(crate) mod index;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub(crate) mod natural;
pub(crate) mod renderer;
pub(crate) mod row;
pub(crate) mod sink;
pub(crate) mod slug;
pub(crate) mod source;

pub use config::{ConfigError, DatasetConfig, RowNaming};
pub use geometry::{GEOMETRY_FIELDS, GEOMETRY_FILE, GeometryError, wkt_to_geometry};
pub use group::{GroupIndex, GroupNames, IndexGroup, group_keys};
pub use index::{EntrySeed, IndexEntry, IndexNode, LinkTarget, PathIndex, RawEntry};
pub use natural::{NaturalKey, compare as natural_compare, natural_key};
pub use renderer::{RenderError, Renderer};
pub use row::Row;
pub use sink::{IndexContext, RenderSink, RowContext, SinkError};
pub use slug::{
    Crumb, format_name, last_segment, sanitise_segment, slug_to_breadcrumb, slug_to_relative_href,
    strip_slug_prefix,
};
pub use source::{SourceError, rows_from_csv_path, rows_from_reader};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockSink;
