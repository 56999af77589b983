//! Document abstraction
//!
//! Decoded pages reach the locator through the `DocumentLoader` and
//! `DocumentHandle` traits. The locator only needs text runs and page size,
//! so that is all the traits expose.
//!
//! # Coordinate spaces
//!
//! ```text
//!  content space (decoder)          viewport space (renderer)
//!  y ^                              +----------> x
//!    |   [run]                      |   [box]
//!    |                              |
//!    +----------> x               y v
//! ```
//!
//! `TextRun` is in content space; `BoundingBox` and everything derived from
//! it is in viewport space.

mod page_dump;
mod traits;
mod types;

pub use page_dump::{DumpedPage, PageDump, PageDumpDocument, PageDumpLoader};
pub use traits::{DocumentHandle, DocumentLoader};
pub use types::{BoundingBox, ExtractedField, PageViewport, TextLocation, TextRun};
