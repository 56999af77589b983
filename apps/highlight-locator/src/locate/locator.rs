//! Snippet search over text runs
//!
//! Case-insensitive exact substring matching across run boundaries. The
//! first occurrence wins and the scan stops there.

use super::window::{lowercase_chars, RunWindow, DEFAULT_WINDOW_RUNS};
use crate::document::TextRun;

/// Runs a snippet was found in
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetMatch<'a> {
    /// Participating runs in reading order, never empty
    pub runs: Vec<&'a TextRun>,
    /// Char offset of the match start inside the first run
    pub start_offset: usize,
    /// Char offset (exclusive) of the match end inside the last run
    pub end_offset: usize,
}

/// Normalized form used for matching and cache keys
///
/// Lowercases char by char, exactly as page text is lowercased, so
/// context-sensitive rules such as the final sigma cannot make the two
/// sides disagree.
pub fn normalize_snippet(snippet: &str) -> String {
    lowercase_chars(snippet.trim()).collect()
}

/// Finds snippets in a page's runs
#[derive(Debug, Clone, Copy)]
pub struct SnippetLocator {
    window_runs: usize,
}

impl Default for SnippetLocator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_RUNS)
    }
}

impl SnippetLocator {
    /// Locator whose matches may span at most `window_runs` runs
    pub fn new(window_runs: usize) -> Self {
        Self {
            window_runs: window_runs.max(1),
        }
    }

    /// Locate `snippet` in `runs`
    ///
    /// Returns `None` for blank snippets, for snippets absent from the page,
    /// and for snippets spanning more runs than the window holds.
    pub fn locate<'a>(&self, runs: &'a [TextRun], snippet: &str) -> Option<SnippetMatch<'a>> {
        let needle = normalize_snippet(snippet);
        if needle.is_empty() {
            return None;
        }

        let mut window = RunWindow::new(self.window_runs);

        for run in runs {
            window.push(run);

            if let Some(byte_start) = window.text().find(&needle) {
                let start = window.text()[..byte_start].chars().count();
                let end = start + needle.chars().count();
                let (runs, start_offset, end_offset) = window.runs_for_range(start, end)?;
                return Some(SnippetMatch {
                    runs,
                    start_offset,
                    end_offset,
                });
            }
        }

        None
    }
}

/// Locate with the default window size
pub fn locate<'a>(runs: &'a [TextRun], snippet: &str) -> Option<SnippetMatch<'a>> {
    SnippetLocator::default().locate(runs, snippet)
}
