//! Markdown rendering with GOV.UK class injection.
//!
//! This crate provides:
//! - [`render_html`]: markdown to plain HTML (tables enabled)
//! - [`govukify`]: add GOV.UK classes to vanilla HTML
//! - [`compile_markdown`]: the two composed
//!
//! # Quick Start
//!
//! ```
//! use odp_markdown::compile_markdown;
//!
//! let html = compile_markdown("This is a paragraph.");
//! assert_eq!(html, "<p class=\"govuk-body\">This is a paragraph.</p>\n");
//! ```

pub(crate) mod govukify;
pub(crate) mod render;
pub(crate) mod util;

pub use govukify::govukify;
pub use render::{compile_markdown, render_html};
pub use util::escape_html;
