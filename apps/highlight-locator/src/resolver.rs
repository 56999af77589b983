//! Location resolution
//!
//! Ties the pieces together for one document: cache lookup, fallback page
//! search, cache population, and coloring of the resolved regions.
//!
//! # Passes and staleness
//!
//! A caller starts a pass with `begin_pass` whenever the displayed document
//! or extraction data changes. Starting a pass supersedes every earlier one:
//! a superseded pass stops at the next field boundary and reports
//! `PassOutcome::Superseded` instead of handing back regions, so results for
//! a document that is no longer on screen never reach UI state. Cache writes
//! made before that point are kept; cache keys are namespaced by document.
//!
//! `close_document` is narrower: it supersedes passes begun before the close
//! only for the closed document. A pass for any other document carries on.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::{timeout, Duration};

use crate::cache::LocationCache;
use crate::config::LocatorConfig;
use crate::document::{DocumentHandle, DocumentLoader, ExtractedField, PageViewport, TextLocation, TextRun};
use crate::error::{LocateError, Result};
use crate::highlight::HighlightRegion;
use crate::locate::{normalize_snippet, project_runs, SnippetLocator};

/// Identifies one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTicket(u64);

/// Result of a resolution pass
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// Regions for the pass that is still current, in field order
    Current(Vec<HighlightRegion>),
    /// A newer pass started; the regions were discarded
    Superseded,
}

impl PassOutcome {
    /// Regions to render, if the pass is still current
    pub fn into_regions(self) -> Option<Vec<HighlightRegion>> {
        match self {
            PassOutcome::Current(regions) => Some(regions),
            PassOutcome::Superseded => None,
        }
    }
}

struct PageText {
    runs: Vec<TextRun>,
    viewport: PageViewport,
}

/// Decoded pages for the duration of one pass
///
/// A page that failed to decode is remembered as failed, so each page is
/// decoded at most once per pass.
#[derive(Default)]
struct PageMemo {
    pages: HashMap<usize, std::result::Result<PageText, String>>,
}

impl PageMemo {
    async fn load(
        &mut self,
        handle: &dyn DocumentHandle,
        page: usize,
        timeout_secs: u64,
    ) -> Result<&PageText> {
        let slot = match self.pages.entry(page) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match decode_page(handle, page, timeout_secs).await {
                Ok(text) => {
                    tracing::debug!(page = page, runs = text.runs.len(), "Decoded page text");
                    entry.insert(Ok(text))
                }
                Err(e) => {
                    entry.insert(Err(e.to_string()));
                    return Err(e);
                }
            },
        };

        match slot {
            Ok(text) => Ok(&*text),
            Err(reason) => Err(LocateError::TextExtraction(format!(
                "page {} failed earlier in this pass: {}",
                page, reason
            ))),
        }
    }
}

async fn decode_page(handle: &dyn DocumentHandle, page: usize, timeout_secs: u64) -> Result<PageText> {
    let runs = with_timeout(timeout_secs, handle.text_runs(page)).await?;
    let viewport = with_timeout(timeout_secs, handle.viewport(page)).await?;
    Ok(PageText { runs, viewport })
}

async fn with_timeout<T>(secs: u64, fut: impl Future<Output = Result<T>>) -> Result<T> {
    timeout(Duration::from_secs(secs), fut)
        .await
        .map_err(|_| LocateError::Timeout(secs))?
}

/// Resolves extracted fields to highlight regions
pub struct LocationResolver {
    loader: Arc<dyn DocumentLoader>,
    cache: Arc<LocationCache>,
    locator: SnippetLocator,
    open_timeout_secs: u64,
    text_timeout_secs: u64,
    generation: AtomicU64,
    /// Generation current when each document was last closed
    closed_at: Mutex<HashMap<String, u64>>,
}

impl LocationResolver {
    pub fn new(loader: Arc<dyn DocumentLoader>, cache: Arc<LocationCache>, config: &LocatorConfig) -> Self {
        Self {
            loader,
            cache,
            locator: SnippetLocator::new(config.window_runs),
            open_timeout_secs: config.open_timeout_secs,
            text_timeout_secs: config.text_timeout_secs,
            generation: AtomicU64::new(0),
            closed_at: Mutex::new(HashMap::new()),
        }
    }

    /// Get the location cache
    pub fn cache(&self) -> &Arc<LocationCache> {
        &self.cache
    }

    /// Start a new pass, superseding all earlier ones
    pub fn begin_pass(&self) -> PassTicket {
        let mut closed_at = self.closed_at.lock();
        let ticket = PassTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1);
        // Every ticket a close could have affected is now superseded anyway
        closed_at.clear();
        ticket
    }

    /// Whether `ticket` belongs to the most recent pass
    pub fn is_current(&self, ticket: PassTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Whether `ticket` is current and `document_id` was not closed since it began
    pub fn is_current_for(&self, ticket: PassTicket, document_id: &str) -> bool {
        let closed_at = self.closed_at.lock();
        self.is_current(ticket)
            && closed_at
                .get(document_id)
                .map_or(true, |&generation| ticket.0 > generation)
    }

    /// Forget a closed or replaced document
    ///
    /// Drops its cached locations and supersedes passes for this document
    /// that began before the close. Passes for other documents are
    /// unaffected.
    pub fn close_document(&self, document_id: &str) -> usize {
        {
            let mut closed_at = self.closed_at.lock();
            let generation = self.generation.load(Ordering::Acquire);
            closed_at.insert(document_id.to_string(), generation);
        }
        self.cache.clear_for_document(document_id)
    }

    /// Resolve one snippet on one page of an open document
    ///
    /// `Ok(None)` means the snippet is blank or not on the page.
    pub async fn resolve_location(
        &self,
        handle: &dyn DocumentHandle,
        document_id: &str,
        page: usize,
        snippet: &str,
    ) -> Result<Option<TextLocation>> {
        let mut memo = PageMemo::default();
        self.locate_on_page(handle, &mut memo, document_id, page, snippet)
            .await
    }

    /// Open `url`, resolve every field, and release the document
    ///
    /// Fields are processed in order. A field that cannot be resolved is
    /// logged and skipped; only a document load failure fails the pass. The
    /// document handle is released on every path.
    pub async fn resolve_highlights(
        &self,
        ticket: PassTicket,
        document_id: &str,
        url: &str,
        fields: &[ExtractedField],
    ) -> Result<PassOutcome> {
        let handle = with_timeout(self.open_timeout_secs, self.loader.open(url))
            .await
            .map_err(|e| match e {
                LocateError::DocumentLoad(_) => e,
                other => LocateError::DocumentLoad(other.to_string()),
            })?;

        let result = self
            .resolve_fields(handle.as_ref(), ticket, document_id, fields)
            .await;

        if let Err(e) = handle.release().await {
            tracing::warn!(document_id = %document_id, error = %e, "Failed to release document");
        }

        let outcome = result?;
        match &outcome {
            PassOutcome::Current(regions) => tracing::info!(
                document_id = %document_id,
                fields = fields.len(),
                resolved = regions.len(),
                "Resolved highlights"
            ),
            PassOutcome::Superseded => tracing::info!(
                document_id = %document_id,
                "Discarded highlights from superseded pass"
            ),
        }
        Ok(outcome)
    }

    async fn resolve_fields(
        &self,
        handle: &dyn DocumentHandle,
        ticket: PassTicket,
        document_id: &str,
        fields: &[ExtractedField],
    ) -> Result<PassOutcome> {
        let mut memo = PageMemo::default();
        let mut regions = Vec::new();

        for field in fields {
            if !self.is_current_for(ticket, document_id) {
                return Ok(PassOutcome::Superseded);
            }

            match self.resolve_field(handle, &mut memo, document_id, field).await {
                Ok(Some(location)) => {
                    regions.push(HighlightRegion::from_location(&location, &field.label, field.confidence));
                }
                Ok(None) => {
                    tracing::debug!(
                        document_id = %document_id,
                        field = %field.label,
                        "Source text not found, no highlight"
                    );
                }
                Err(e) if e.is_fatal_to_pass() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        document_id = %document_id,
                        field = %field.label,
                        error = %e,
                        "Failed to resolve field location"
                    );
                }
            }
        }

        if !self.is_current_for(ticket, document_id) {
            return Ok(PassOutcome::Superseded);
        }
        Ok(PassOutcome::Current(regions))
    }

    async fn resolve_field(
        &self,
        handle: &dyn DocumentHandle,
        memo: &mut PageMemo,
        document_id: &str,
        field: &ExtractedField,
    ) -> Result<Option<TextLocation>> {
        if let Some(page) = field.page {
            return self
                .locate_on_page(handle, memo, document_id, page, &field.source_text)
                .await;
        }

        // No page hint: first page containing the text wins
        for page in 1..=handle.page_count() {
            match self
                .locate_on_page(handle, memo, document_id, page, &field.source_text)
                .await
            {
                Ok(Some(location)) => return Ok(Some(location)),
                Ok(None) => {}
                Err(e) if e.is_fatal_to_pass() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        document_id = %document_id,
                        field = %field.label,
                        page = page,
                        error = %e,
                        "Skipping unreadable page"
                    );
                }
            }
        }
        Ok(None)
    }

    async fn locate_on_page(
        &self,
        handle: &dyn DocumentHandle,
        memo: &mut PageMemo,
        document_id: &str,
        page: usize,
        snippet: &str,
    ) -> Result<Option<TextLocation>> {
        if normalize_snippet(snippet).is_empty() {
            return Ok(None);
        }

        if let Some(location) = self.cache.get(document_id, page, snippet) {
            tracing::debug!(document_id = %document_id, page = page, "Location cache hit");
            return Ok(Some(location));
        }

        let page_count = handle.page_count();
        if page == 0 || page > page_count {
            return Err(LocateError::PageOutOfRange { page, page_count });
        }

        let text = memo.load(handle, page, self.text_timeout_secs).await?;
        let Some(found) = self.locator.locate(&text.runs, snippet) else {
            return Ok(None);
        };
        let Some(bbox) = project_runs(found.runs.iter().copied(), text.viewport.height) else {
            return Ok(None);
        };

        let location = TextLocation {
            text: snippet.to_string(),
            page,
            bbox,
        };
        self.cache.set(document_id, page, snippet, location.clone());
        Ok(Some(location))
    }
}
