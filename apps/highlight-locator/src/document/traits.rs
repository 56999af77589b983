//! Document collaborator traits
//!
//! The locator never touches a concrete PDF library. Decoding lives behind
//! these two traits so any backend (pdf.js bridge, MuPDF, a JSON page dump)
//! can feed text runs in.

use async_trait::async_trait;

use super::types::{PageViewport, TextRun};
use crate::error::Result;

/// Opens documents by URL or path
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Open and decode a document
    ///
    /// Failures surface as `LocateError::DocumentLoad`.
    async fn open(&self, url: &str) -> Result<Box<dyn DocumentHandle>>;
}

/// An open, decoded document
///
/// Handles hold decoder resources and must be released once a resolution
/// pass is done with them, on success and failure alike.
#[async_trait]
pub trait DocumentHandle: Send + Sync {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Text runs for a page (1-indexed) in reading order
    async fn text_runs(&self, page: usize) -> Result<Vec<TextRun>>;

    /// Unscaled page size (1-indexed)
    async fn viewport(&self, page: usize) -> Result<PageViewport>;

    /// Free decoder resources
    async fn release(&self) -> Result<()>;
}
