//! Content-space to viewport-space projection
//!
//! Runs whose baselines differ wildly (a match wrapping across a column or
//! page fold) still produce one box enclosing the whole extent.

use crate::document::{BoundingBox, TextRun};

/// Enclosing viewport-space box of `runs`
///
/// `page_height` is the unscaled page height used to flip the y axis.
/// Returns `None` when `runs` is empty.
pub fn project_runs<'a, I>(runs: I, page_height: f32) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a TextRun>,
{
    let mut iter = runs.into_iter();
    let first = iter.next()?;

    let (mut min_x, mut min_y) = (first.origin_x, first.origin_y);
    let (mut max_x, mut max_y) = (first.right(), first.top());

    for run in iter {
        min_x = min_x.min(run.origin_x);
        min_y = min_y.min(run.origin_y);
        max_x = max_x.max(run.right());
        max_y = max_y.max(run.top());
    }

    Some(BoundingBox {
        x: min_x,
        y: page_height - max_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_run_flips_y() {
        let run = TextRun::new("Premium", 72.0, 700.0, 40.0, 12.0);
        let bbox = project_runs([&run], 792.0).unwrap();
        assert_eq!(bbox, BoundingBox::new(72.0, 80.0, 40.0, 12.0));
    }

    #[test]
    fn test_multiple_runs_enclosed() {
        let runs = [
            TextRun::new(" Premium:", 120.0, 700.0, 55.0, 12.0),
            TextRun::new(" $500", 175.0, 698.0, 30.0, 16.0),
        ];
        let bbox = project_runs(&runs, 792.0).unwrap();
        assert_eq!(bbox.x, 120.0);
        assert_eq!(bbox.width, 85.0);
        // max_y = 714, min_y = 698
        assert_eq!(bbox.y, 78.0);
        assert_eq!(bbox.height, 16.0);
    }

    #[test]
    fn test_runs_on_different_lines_over_highlight() {
        let runs = [
            TextRun::new("line one", 72.0, 700.0, 100.0, 12.0),
            TextRun::new("line two", 72.0, 100.0, 100.0, 12.0),
        ];
        let bbox = project_runs(&runs, 792.0).unwrap();
        assert_eq!(bbox.y, 80.0);
        assert_eq!(bbox.height, 612.0);
    }

    #[test]
    fn test_empty_runs() {
        let runs: Vec<TextRun> = Vec::new();
        assert!(project_runs(&runs, 792.0).is_none());
    }
}
