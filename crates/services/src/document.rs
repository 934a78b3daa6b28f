use async_trait::async_trait;
use tracing::warn;

use exam_core::DocumentViewport;
use exam_core::model::ExamIdentity;

use crate::error::DocumentError;

/// Handle to an externally rendered paged document.
///
/// The engine never touches pixels; it asks the renderer for a page at a
/// zoom factor and otherwise only needs the page count.
#[async_trait]
pub trait PagedDocument: Send + Sync {
    fn page_count(&self) -> u32;

    /// Render one page at the given zoom factor.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Renderer` if the render fails.
    async fn render_page(&self, page: u32, zoom: f32) -> Result<(), DocumentError>;
}

/// Locates and opens exam documents by path.
#[async_trait]
pub trait DocumentOpener: Send + Sync {
    /// Open the document at a relative path.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotFound` when no document exists at the path.
    async fn open(&self, path: &str) -> Result<Box<dyn PagedDocument>, DocumentError>;
}

/// The exam document pane: an optional opened document plus its viewport.
///
/// A missing document is a degraded, non-fatal state; the view keeps the
/// expected path so the caller can show where the file was looked for, and
/// the viewport collapses to a single page.
pub struct DocumentView {
    document: Option<Box<dyn PagedDocument>>,
    viewport: DocumentViewport,
    expected_path: String,
}

impl DocumentView {
    /// Open the document for an identity, degrading on absence.
    pub async fn open(opener: &dyn DocumentOpener, identity: &ExamIdentity) -> Self {
        let expected_path = identity.document_path();
        match opener.open(&expected_path).await {
            Ok(document) => {
                let viewport = DocumentViewport::new(document.page_count());
                Self {
                    document: Some(document),
                    viewport,
                    expected_path,
                }
            }
            Err(err) => {
                warn!(path = %expected_path, error = %err, "exam document unavailable");
                Self {
                    document: None,
                    viewport: DocumentViewport::new(1),
                    expected_path,
                }
            }
        }
    }

    #[must_use]
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Where the document was expected; shown in the degraded state.
    #[must_use]
    pub fn expected_path(&self) -> &str {
        &self.expected_path
    }

    #[must_use]
    pub fn viewport(&self) -> &DocumentViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut DocumentViewport {
        &mut self.viewport
    }

    /// Re-render the page the viewport currently points at. A no-op without
    /// a document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Renderer` if the render fails.
    pub async fn render_current(&self) -> Result<(), DocumentError> {
        if let Some(document) = &self.document {
            let (page, zoom) = self.viewport.render_request();
            document.render_page(page, zoom).await?;
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{ExamType, Subject};
    use std::sync::Mutex;
    use std::sync::Arc;

    struct FakeDocument {
        pages: u32,
        rendered: Arc<Mutex<Vec<(u32, f32)>>>,
    }

    #[async_trait]
    impl PagedDocument for FakeDocument {
        fn page_count(&self) -> u32 {
            self.pages
        }

        async fn render_page(&self, page: u32, zoom: f32) -> Result<(), DocumentError> {
            self.rendered.lock().unwrap().push((page, zoom));
            Ok(())
        }
    }

    struct FakeOpener {
        pages: Option<u32>,
        rendered: Arc<Mutex<Vec<(u32, f32)>>>,
    }

    #[async_trait]
    impl DocumentOpener for FakeOpener {
        async fn open(&self, path: &str) -> Result<Box<dyn PagedDocument>, DocumentError> {
            match self.pages {
                Some(pages) => Ok(Box::new(FakeDocument {
                    pages,
                    rendered: self.rendered.clone(),
                })),
                None => Err(DocumentError::NotFound(path.to_string())),
            }
        }
    }

    fn identity() -> ExamIdentity {
        ExamIdentity::new(Subject::History, 2021, ExamType::Local)
    }

    #[tokio::test]
    async fn open_wires_page_count_into_viewport() {
        let opener = FakeOpener {
            pages: Some(12),
            rendered: Arc::default(),
        };
        let view = DocumentView::open(&opener, &identity()).await;

        assert!(view.has_document());
        assert_eq!(view.viewport().total_pages(), 12);
    }

    #[tokio::test]
    async fn missing_document_degrades() {
        let opener = FakeOpener {
            pages: None,
            rendered: Arc::default(),
        };
        let view = DocumentView::open(&opener, &identity()).await;

        assert!(!view.has_document());
        assert_eq!(view.expected_path(), "data/history/2021_local.pdf");
        assert_eq!(view.viewport().total_pages(), 1);
        // rendering without a document is quietly skipped
        view.render_current().await.unwrap();
    }

    #[tokio::test]
    async fn render_follows_viewport_cursor() {
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let opener = FakeOpener {
            pages: Some(5),
            rendered: rendered.clone(),
        };
        let mut view = DocumentView::open(&opener, &identity()).await;

        view.viewport_mut().go_to_page(3);
        view.viewport_mut().set_zoom(1.5);
        view.render_current().await.unwrap();

        assert_eq!(rendered.lock().unwrap().as_slice(), &[(3, 1.5)]);
    }
}
