//! JSON page-dump documents
//!
//! A page dump is the text layer of a document already decoded elsewhere:
//! one entry per page with its size and text runs. It backs the diagnostic
//! binary and the tests, and is a convenient shape for decoder bridges that
//! emit JSON.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::traits::{DocumentHandle, DocumentLoader};
use super::types::{PageViewport, TextRun};
use crate::error::{LocateError, Result};

/// Decoded text layer of a whole document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDump {
    pub pages: Vec<DumpedPage>,
}

/// Text layer of a single page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpedPage {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl PageDump {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = tokio::fs::read(path.as_ref()).await?;
        Self::from_bytes(&data)
    }
}

/// `DocumentHandle` over a page dump
pub struct PageDumpDocument {
    dump: Arc<PageDump>,
    released: Arc<AtomicBool>,
}

impl PageDumpDocument {
    pub fn new(dump: Arc<PageDump>) -> Self {
        Self {
            dump,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that flips once `release` has been called
    pub fn release_flag(&self) -> Arc<AtomicBool> {
        self.released.clone()
    }

    fn page(&self, page: usize) -> Result<&DumpedPage> {
        if self.released.load(Ordering::Acquire) {
            return Err(LocateError::TextExtraction("document already released".into()));
        }
        page.checked_sub(1)
            .and_then(|idx| self.dump.pages.get(idx))
            .ok_or(LocateError::PageOutOfRange {
                page,
                page_count: self.dump.pages.len(),
            })
    }
}

#[async_trait]
impl DocumentHandle for PageDumpDocument {
    fn page_count(&self) -> usize {
        self.dump.pages.len()
    }

    async fn text_runs(&self, page: usize) -> Result<Vec<TextRun>> {
        Ok(self.page(page)?.runs.clone())
    }

    async fn viewport(&self, page: usize) -> Result<PageViewport> {
        let page = self.page(page)?;
        Ok(PageViewport {
            width: page.width,
            height: page.height,
        })
    }

    async fn release(&self) -> Result<()> {
        self.released.store(true, Ordering::Release);
        Ok(())
    }
}

/// Loader that serves page dumps
///
/// URLs registered with `insert` are served from memory; anything else is
/// treated as a path to a JSON page dump on disk.
#[derive(Default)]
pub struct PageDumpLoader {
    documents: HashMap<String, Arc<PageDump>>,
    opened: Mutex<Vec<Arc<AtomicBool>>>,
}

impl PageDumpLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-memory document under `url`
    pub fn insert(&mut self, url: impl Into<String>, dump: PageDump) {
        self.documents.insert(url.into(), Arc::new(dump));
    }

    pub fn with_document(mut self, url: impl Into<String>, dump: PageDump) -> Self {
        self.insert(url, dump);
        self
    }

    /// Whether every handle handed out so far has been released
    pub fn all_released(&self) -> bool {
        self.opened.lock().iter().all(|flag| flag.load(Ordering::Acquire))
    }
}

#[async_trait]
impl DocumentLoader for PageDumpLoader {
    async fn open(&self, url: &str) -> Result<Box<dyn DocumentHandle>> {
        let dump = match self.documents.get(url) {
            Some(dump) => dump.clone(),
            None => Arc::new(
                PageDump::from_path(url)
                    .await
                    .map_err(|e| LocateError::DocumentLoad(format!("{}: {}", url, e)))?,
            ),
        };

        let document = PageDumpDocument::new(dump);
        self.opened.lock().push(document.release_flag());
        Ok(Box::new(document))
    }
}
