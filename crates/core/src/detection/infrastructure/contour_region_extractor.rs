use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::region_labelling::{connected_components, Connectivity};
use ndarray::Array2;

use crate::detection::domain::region_extractor::{ExtractedRegion, RegionExtractor};
use crate::shared::bounding_box::BoundingBox;

const FOREGROUND: u8 = 255;
const BACKGROUND: u8 = 0;

/// Region extraction by outer-border tracing.
///
/// Only top-level outer borders are reported, so holes and anything nested
/// inside a hole are skipped. Border tracing and labelling both use
/// 8-connectivity; the label of a border's first point gives the region's
/// cell count. Regions come out in raster order of their first border pixel.
pub struct ContourRegionExtractor;

impl ContourRegionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContourRegionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Background margin around the traced image. Border tracing only reports
/// outer borders reliably for regions that do not touch the image edge.
const MARGIN: i32 = 1;

/// Mask as a binary image surrounded by a `MARGIN`-cell background frame.
fn mask_to_image(mask: &Array2<bool>) -> GrayImage {
    let (rows, cols) = mask.dim();
    let pad = MARGIN as u32;
    GrayImage::from_fn(cols as u32 + 2 * pad, rows as u32 + 2 * pad, |x, y| {
        let inside = x >= pad && y >= pad && x < cols as u32 + pad && y < rows as u32 + pad;
        if inside && mask[[(y - pad) as usize, (x - pad) as usize]] {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Cell count per component label; index 0 is background.
fn label_areas(labels: &image::ImageBuffer<Luma<u32>, Vec<u32>>) -> Vec<usize> {
    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    let mut areas = vec![0usize; max_label + 1];
    for p in labels.pixels() {
        areas[p[0] as usize] += 1;
    }
    areas[0] = 0;
    areas
}

impl RegionExtractor for ContourRegionExtractor {
    fn extract(&self, mask: &Array2<bool>) -> Vec<ExtractedRegion> {
        let (rows, cols) = mask.dim();
        if rows == 0 || cols == 0 {
            return Vec::new();
        }

        let image = mask_to_image(mask);
        let labels = connected_components(&image, Connectivity::Eight, Luma([BACKGROUND]));
        let areas = label_areas(&labels);

        find_contours::<i32>(&image)
            .into_iter()
            .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
            .filter_map(|c| {
                let first = c.points.first()?;
                let label = labels.get_pixel(first.x as u32, first.y as u32)[0] as usize;
                let bbox = BoundingBox::enclosing(
                    c.points.iter().map(|p| (p.x - MARGIN, p.y - MARGIN)),
                )?;
                Some(ExtractedRegion {
                    area: areas.get(label).copied().unwrap_or(0),
                    bbox,
                })
            })
            .collect()
    }
}
