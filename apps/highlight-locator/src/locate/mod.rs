//! Snippet location on a single page
//!
//! ```text
//!  runs ──► RunWindow ──► SnippetLocator ──► SnippetMatch ──► project_runs ──► BoundingBox
//!           (≤ W runs)    (first match)      (run subset)     (y flip)
//! ```

mod locator;
mod projector;
mod window;

pub use locator::{locate, normalize_snippet, SnippetLocator, SnippetMatch};
pub use projector::project_runs;
pub use window::{RunWindow, DEFAULT_WINDOW_RUNS};
