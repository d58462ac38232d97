use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::rendering::domain::overlay_renderer::OverlayRenderer;
use crate::shared::bounding_box::BoundingBox;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// Single-image pipeline: read → detect → draw → write.
pub struct AnnotateImageUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    renderer: Box<dyn OverlayRenderer>,
}

impl AnnotateImageUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        renderer: Box<dyn OverlayRenderer>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            detector,
            renderer,
        }
    }

    /// Reads one image, outlines its faces, writes the result, and returns
    /// the face boxes.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        self.reader.open(input_path)?;
        let mut frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        let faces = self.detector.detect(&frame)?;
        log::info!("Found {} face(s) in {}", faces.len(), input_path.display());

        self.renderer.draw(&mut frame, &faces)?;
        self.image_writer.write(output_path, &frame)?;
        Ok(faces)
    }
}
