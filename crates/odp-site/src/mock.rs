//! Mock render sink for testing.
//!
//! Provides [`MockSink`] for exercising the render pipeline without
//! writing any files.

use std::path::{Path, PathBuf};

use crate::sink::{IndexContext, RenderSink, RowContext, SinkError};

/// Recording sink for unit tests.
///
/// Stores every rendered page in memory, in call order.
///
/// # Example
///
/// ```ignore
/// use odp_site::{DatasetConfig, MockSink, Renderer};
///
/// let mut renderer = Renderer::new(config, MockSink::new())?;
/// renderer.render(rows)?;
/// let sink = renderer.into_sink();
/// assert_eq!(sink.row_pages().len(), 4);
/// ```
#[derive(Debug, Default)]
pub struct MockSink {
    row_pages: Vec<(PathBuf, RowContext)>,
    index_pages: Vec<(PathBuf, IndexContext)>,
    failing: bool,
}

impl MockSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose operations all fail, for error-path tests.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Every detail page rendered, in call order.
    #[must_use]
    pub fn row_pages(&self) -> &[(PathBuf, RowContext)] {
        &self.row_pages
    }

    /// Every index page rendered, in call order.
    #[must_use]
    pub fn index_pages(&self) -> &[(PathBuf, IndexContext)] {
        &self.index_pages
    }

    /// The detail-page context rendered for `path`, if any.
    ///
    /// Later writes shadow earlier ones, matching what a filesystem sink
    /// would leave behind.
    #[must_use]
    pub fn row_page(&self, path: impl AsRef<Path>) -> Option<&RowContext> {
        let path = path.as_ref();
        self.row_pages
            .iter()
            .rev()
            .find(|(page, _)| page == path)
            .map(|(_, context)| context)
    }

    /// The index-page context rendered for `path`, if any.
    #[must_use]
    pub fn index_page(&self, path: impl AsRef<Path>) -> Option<&IndexContext> {
        let path = path.as_ref();
        self.index_pages
            .iter()
            .rev()
            .find(|(page, _)| page == path)
            .map(|(_, context)| context)
    }
}

impl RenderSink for MockSink {
    fn render_row(&mut self, path: &Path, context: &RowContext) -> Result<(), SinkError> {
        if self.failing {
            return Err(SinkError::Other("mock sink configured to fail".to_owned()));
        }
        self.row_pages.push((path.to_path_buf(), context.clone()));
        Ok(())
    }

    fn render_index(&mut self, path: &Path, context: &IndexContext) -> Result<(), SinkError> {
        if self.failing {
            return Err(SinkError::Other("mock sink configured to fail".to_owned()));
        }
        self.index_pages.push((path.to_path_buf(), context.clone()));
        Ok(())
    }
}
