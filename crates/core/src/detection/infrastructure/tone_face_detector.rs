use crate::detection::domain::detection_config::{ConfigError, DetectionConfig};
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::region_extractor::{boxes_with_min_area, RegionExtractor};
use crate::detection::domain::region_matcher::pair_regions;
use crate::detection::domain::tone_grid::aggregate;
use crate::detection::infrastructure::contour_region_extractor::ContourRegionExtractor;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Finds faces by pairing skin-tone regions with overlapping hair-tone regions.
///
/// Stateless per frame: the same frame always yields the same boxes in the
/// same order.
pub struct ToneFaceDetector {
    config: DetectionConfig,
    extractor: Box<dyn RegionExtractor>,
}

impl ToneFaceDetector {
    pub fn new(config: DetectionConfig) -> Result<Self, ConfigError> {
        Self::with_extractor(config, Box::new(ContourRegionExtractor::new()))
    }

    pub fn with_extractor(
        config: DetectionConfig,
        extractor: Box<dyn RegionExtractor>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Face boxes in pixel coordinates, clipped to the frame.
    pub fn find_faces(&self, frame: &Frame) -> Vec<BoundingBox> {
        let masks = aggregate(frame, self.config.cell_size());
        let (grid_rows, grid_cols) = masks.dim();
        if grid_rows == 0 || grid_cols == 0 {
            return Vec::new();
        }

        let skin_regions = self.extractor.extract(&masks.skin);
        let hair_regions = self.extractor.extract(&masks.hair);
        let skin_boxes = boxes_with_min_area(&skin_regions, self.config.min_area);
        let hair_boxes = boxes_with_min_area(&hair_regions, self.config.min_area);

        let matches = pair_regions(&skin_boxes, &hair_boxes);

        log::debug!(
            "frame {}: grid {grid_rows}x{grid_cols}, skin {}/{} regions, hair {}/{} regions, {} faces",
            frame.index(),
            skin_boxes.len(),
            skin_regions.len(),
            hair_boxes.len(),
            hair_regions.len(),
            matches.len()
        );
        for m in &matches {
            log::trace!(
                "skin #{} paired with hair #{} via {:?}",
                m.skin_index,
                m.hair_index,
                m.rule
            );
        }

        let cols = frame.cols() as i32;
        let rows = frame.rows() as i32;
        matches
            .iter()
            .map(|m| to_pixel_space(&m.face, self.config.group_width, cols, rows))
            .collect()
    }
}

/// Rescales a grid-space box by the cell size and clips it to the frame.
pub fn to_pixel_space(
    grid_box: &BoundingBox,
    group_width: i32,
    cols: i32,
    rows: i32,
) -> BoundingBox {
    grid_box.scaled(group_width).clipped_to(cols, rows)
}

impl FaceDetector for ToneFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        Ok(self.find_faces(frame))
    }
}

/// Detects faces in one frame with the given cell size and region threshold.
///
/// Fails only when `group_width <= 0`; empty or tiny frames give no faces.
pub fn detect_faces(
    frame: &Frame,
    group_width: i32,
    min_area: usize,
) -> Result<Vec<BoundingBox>, ConfigError> {
    let detector = ToneFaceDetector::new(DetectionConfig::new(group_width, min_area)?)?;
    Ok(detector.find_faces(frame))
}
