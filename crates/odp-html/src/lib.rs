//! GOV.UK-styled HTML pages for the odp render engine.
//!
//! [`HtmlSink`] implements [`odp_site::RenderSink`] by writing each
//! detail and index page as a standalone HTML file: breadcrumb trail,
//! field table, grouped or flat listings, download and GeoJSON links.
//! Markup is built with `write!`; there is no template engine.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use odp_html::HtmlSink;
//! use odp_refdata::OrganisationTable;
//! use odp_site::{DatasetConfig, Renderer, rows_from_csv_path};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DatasetConfig::load(Path::new("dataset.toml"))?;
//! let organisations = OrganisationTable::from_csv_path("organisation.csv")?;
//! let sink = HtmlSink::new().with_lookup("organisation", organisations);
//!
//! let mut renderer = Renderer::new(config, sink)?;
//! renderer.render(rows_from_csv_path("dataset.csv")?)?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod page;
pub(crate) mod sink;

pub use sink::HtmlSink;
