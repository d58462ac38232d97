use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for marking detected faces on a frame.
///
/// Implementations modify the frame in place (`&mut Frame`).
pub trait OverlayRenderer: Send {
    fn draw(&self, frame: &mut Frame, faces: &[BoundingBox])
        -> Result<(), Box<dyn std::error::Error>>;
}
