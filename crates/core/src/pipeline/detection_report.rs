use std::path::Path;

use serde::Serialize;

use crate::shared::bounding_box::BoundingBox;

/// Faces found in one frame, in pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameDetections {
    pub frame: usize,
    pub faces: Vec<BoundingBox>,
}

/// Writes detections as a pretty-printed JSON array.
pub fn write_report(
    path: &Path,
    detections: &[FrameDetections],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(detections)?;
    std::fs::write(path, json)?;
    Ok(())
}
