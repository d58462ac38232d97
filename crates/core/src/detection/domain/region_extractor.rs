use ndarray::Array2;

use crate::shared::bounding_box::BoundingBox;

/// A connected foreground region of a binary grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedRegion {
    /// Number of foreground cells in the region.
    pub area: usize,
    /// Tight box around the region, in grid coordinates.
    pub bbox: BoundingBox,
}

/// Turns a binary mask into its outermost 8-connected regions.
///
/// Holes are not reported, nor are regions nested inside another region's
/// hole. Region order is the extractor's own and is significant downstream.
pub trait RegionExtractor: Send {
    fn extract(&self, mask: &Array2<bool>) -> Vec<ExtractedRegion>;
}

/// Keeps the boxes of regions with at least `min_area` cells, in order.
pub fn boxes_with_min_area(regions: &[ExtractedRegion], min_area: usize) -> Vec<BoundingBox> {
    regions
        .iter()
        .filter(|r| r.area >= min_area)
        .map(|r| r.bbox)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(area: usize, x: i32) -> ExtractedRegion {
        ExtractedRegion {
            area,
            bbox: BoundingBox::new(x, 0, 1, 1),
        }
    }

    #[test]
    fn test_min_area_is_inclusive() {
        let regions = vec![region(19, 0), region(20, 1), region(21, 2)];
        let boxes = boxes_with_min_area(&regions, 20);
        assert_eq!(boxes.iter().map(|b| b.x).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_zero_min_area_keeps_everything() {
        let regions = vec![region(0, 0), region(1, 1)];
        assert_eq!(boxes_with_min_area(&regions, 0).len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let regions = vec![region(30, 5), region(30, 2), region(30, 9)];
        let xs: Vec<_> = boxes_with_min_area(&regions, 1).iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![5, 2, 9]);
    }
}
