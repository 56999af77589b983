//! Page filtering and zoom scaling of highlight regions

use serde::{Deserialize, Serialize};

use super::color::{color_for, HighlightColor};
use crate::document::{BoundingBox, TextLocation};

/// A resolved highlight for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRegion {
    /// Page number (1-indexed)
    pub page: usize,
    /// Unscaled viewport-space box
    pub bbox: BoundingBox,
    pub color: HighlightColor,
    pub confidence: Option<f32>,
    pub field_label: String,
}

impl HighlightRegion {
    /// Build a region from a resolved location, coloring it by confidence
    pub fn from_location(location: &TextLocation, field_label: &str, confidence: Option<f32>) -> Self {
        Self {
            page: location.page,
            bbox: location.bbox,
            color: color_for(confidence),
            confidence,
            field_label: field_label.to_string(),
        }
    }
}

/// The page currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Page number (1-indexed)
    pub page: usize,
    /// Zoom factor (1.0 = 72 DPI)
    pub scale: f32,
    /// Unscaled page width
    pub width: f32,
    /// Unscaled page height
    pub height: f32,
}

/// A region scaled for the current zoom level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRegion {
    pub bbox: BoundingBox,
    pub color: HighlightColor,
    pub confidence: Option<f32>,
    pub field_label: String,
}

/// Overlay content for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPage {
    pub regions: Vec<ScaledRegion>,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl ProjectedPage {
    /// Whether an overlay should be drawn at all
    ///
    /// A page without regions gets no overlay element, not an empty one.
    pub fn should_render(&self) -> bool {
        !self.regions.is_empty()
    }
}

/// Keep the regions on `view.page` and scale them by `view.scale`
pub fn project_highlights(regions: &[HighlightRegion], view: &PageView) -> ProjectedPage {
    let regions = regions
        .iter()
        .filter(|r| r.page == view.page)
        .map(|r| ScaledRegion {
            bbox: r.bbox.scaled(view.scale),
            color: r.color,
            confidence: r.confidence,
            field_label: r.field_label.clone(),
        })
        .collect();

    ProjectedPage {
        regions,
        canvas_width: view.width * view.scale,
        canvas_height: view.height * view.scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(page: usize, label: &str, confidence: Option<f32>) -> HighlightRegion {
        HighlightRegion {
            page,
            bbox: BoundingBox::new(100.0, 200.0, 80.0, 12.0),
            color: color_for(confidence),
            confidence,
            field_label: label.to_string(),
        }
    }

    fn view(page: usize, scale: f32) -> PageView {
        PageView {
            page,
            scale,
            width: 612.0,
            height: 792.0,
        }
    }

    #[test]
    fn test_identity_scale() {
        let projected = project_highlights(&[region(1, "Premium", Some(95.0))], &view(1, 1.0));
        assert_eq!(projected.canvas_width, 612.0);
        assert_eq!(projected.canvas_height, 792.0);
        assert_eq!(projected.regions[0].bbox, BoundingBox::new(100.0, 200.0, 80.0, 12.0));
    }

    #[test]
    fn test_linear_scaling() {
        let projected = project_highlights(&[region(1, "Premium", Some(95.0))], &view(1, 1.5));
        assert_eq!(projected.canvas_width, 918.0);
        assert_eq!(projected.canvas_height, 1188.0);
        assert_eq!(projected.regions[0].bbox, BoundingBox::new(150.0, 300.0, 120.0, 18.0));
    }

    #[test]
    fn test_filters_by_page() {
        let regions = [
            region(1, "Premium", Some(95.0)),
            region(1, "Deductible", Some(72.0)),
            region(2, "Insured", None),
        ];
        let projected = project_highlights(&regions, &view(1, 1.0));
        assert_eq!(projected.regions.len(), 2);
        assert_eq!(projected.regions[0].field_label, "Premium");
        assert_eq!(projected.regions[1].field_label, "Deductible");
        assert!(projected.should_render());
    }

    #[test]
    fn test_no_regions_renders_nothing() {
        let regions = [region(2, "Insured", None)];
        let projected = project_highlights(&regions, &view(1, 2.0));
        assert!(projected.regions.is_empty());
        assert!(!projected.should_render());
    }

    #[test]
    fn test_region_from_location() {
        let location = TextLocation {
            text: "$500".to_string(),
            page: 3,
            bbox: BoundingBox::new(1.0, 2.0, 3.0, 4.0),
        };
        let region = HighlightRegion::from_location(&location, "Premium", Some(69.0));
        assert_eq!(region.page, 3);
        assert_eq!(region.color, HighlightColor::DangerRed);
        assert_eq!(region.field_label, "Premium");
    }
}
