//! Highlight coloring and projection for the page on screen

mod color;
mod projector;

pub use color::{color_for, HighlightColor, HIGH_CONFIDENCE, MEDIUM_CONFIDENCE};
pub use projector::{project_highlights, HighlightRegion, PageView, ProjectedPage, ScaledRegion};
