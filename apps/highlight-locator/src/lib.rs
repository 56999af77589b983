//! Highlight Locator Library
//!
//! Resolves the source text of extracted fields to on-page bounding boxes,
//! so a reviewer UI can draw confidence-colored highlights over the exact
//! spot a value came from.
//!
//! # Modules
//!
//! - `document`: Collaborator traits for decoded documents, plus a JSON page-dump backend
//! - `locate`: Snippet search across text runs and content-to-viewport projection
//! - `cache`: Bounded LRU cache of resolved locations
//! - `highlight`: Confidence coloring and page/zoom projection of regions
//! - `resolver`: Orchestration of the above for a whole document

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod highlight;
pub mod locate;
pub mod resolver;

pub use cache::{CacheConfig, CacheStats, LocationCache};
pub use config::LocatorConfig;
pub use error::{LocateError, Result};
pub use resolver::{LocationResolver, PassOutcome, PassTicket};
