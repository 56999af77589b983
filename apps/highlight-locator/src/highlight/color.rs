//! Confidence to highlight color mapping
//!
//! Thresholds are inclusive lower bounds compared against the raw score;
//! callers must not round before mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scores at or above this are high confidence
pub const HIGH_CONFIDENCE: f32 = 90.0;
/// Scores at or above this (and below `HIGH_CONFIDENCE`) are medium
pub const MEDIUM_CONFIDENCE: f32 = 70.0;

/// Highlight color bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightColor {
    NeutralGray,
    SuccessGreen,
    InfoBlue,
    DangerRed,
}

impl HighlightColor {
    /// Color token understood by the rendering layer
    pub fn token(&self) -> &'static str {
        match self {
            HighlightColor::NeutralGray => "neutral-gray",
            HighlightColor::SuccessGreen => "success-green",
            HighlightColor::InfoBlue => "info-blue",
            HighlightColor::DangerRed => "danger-red",
        }
    }

    /// CSS color for overlays that do not resolve tokens
    pub fn css_color(&self) -> &'static str {
        match self {
            HighlightColor::NeutralGray => "#9ca3af",
            HighlightColor::SuccessGreen => "#22c55e",
            HighlightColor::InfoBlue => "#3b82f6",
            HighlightColor::DangerRed => "#ef4444",
        }
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            HighlightColor::NeutralGray => "Unknown",
            HighlightColor::SuccessGreen => "High",
            HighlightColor::InfoBlue => "Medium",
            HighlightColor::DangerRed => "Low",
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Map a confidence score (0-100) to its color bucket
///
/// Total over `f32`: NaN compares false against both thresholds and lands in
/// `DangerRed`.
pub fn color_for(confidence: Option<f32>) -> HighlightColor {
    match confidence {
        None => HighlightColor::NeutralGray,
        Some(c) if c >= HIGH_CONFIDENCE => HighlightColor::SuccessGreen,
        Some(c) if c >= MEDIUM_CONFIDENCE => HighlightColor::InfoBlue,
        Some(_) => HighlightColor::DangerRed,
    }
}
