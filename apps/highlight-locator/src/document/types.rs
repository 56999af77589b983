//! Core document types
//!
//! Text runs arrive in content space (origin bottom-left, y up). Everything
//! this crate hands back is in viewport space (origin top-left, y down).

use serde::{Deserialize, Serialize};

/// A fragment of decoded page text with its own position and size
///
/// Coordinates are page-local content-space units as emitted by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// Decoded text
    pub content: String,
    /// Left edge
    pub origin_x: f32,
    /// Baseline, measured from the bottom of the page
    pub origin_y: f32,
    /// Advance width
    pub width: f32,
    /// Glyph height
    pub height: f32,
}

impl TextRun {
    pub fn new(content: impl Into<String>, origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            content: content.into(),
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.origin_x + self.width
    }

    pub fn top(&self) -> f32 {
        self.origin_y + self.height
    }
}

/// Unscaled page size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewport {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

/// Axis-aligned rectangle in viewport space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Multiply every coordinate by `scale`
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            x: self.x * scale,
            y: self.y * scale,
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// Resolved location of one snippet on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLocation {
    /// Snippet as requested
    pub text: String,
    /// Page number (1-indexed)
    pub page: usize,
    /// Enclosing box in viewport space
    pub bbox: BoundingBox,
}

/// One field of extraction output that should be highlighted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedField {
    /// Field label shown next to the highlight
    pub label: String,
    /// Source text the value was extracted from
    pub source_text: String,
    /// Page hint (1-indexed); every page is searched when absent
    #[serde(default)]
    pub page: Option<usize>,
    /// Extraction confidence on a 0-100 scale
    #[serde(default)]
    pub confidence: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_run_deserialization() {
        let json = r#"{"content":"Premium","originX":72.0,"originY":700.0,"width":40.0,"height":12.0}"#;
        let run: TextRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.content, "Premium");
        assert_eq!(run.right(), 112.0);
        assert_eq!(run.top(), 712.0);
    }

    #[test]
    fn test_bbox_scaled() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0).scaled(2.0);
        assert_eq!(bbox, BoundingBox::new(20.0, 40.0, 60.0, 80.0));
    }

    #[test]
    fn test_extracted_field_defaults() {
        let json = r#"{"label":"Premium","sourceText":"$500"}"#;
        let field: ExtractedField = serde_json::from_str(json).unwrap();
        assert_eq!(field.page, None);
        assert_eq!(field.confidence, None);
    }
}
