use image::{ImageBuffer, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::rendering::domain::overlay_renderer::OverlayRenderer;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::color::Color;
use crate::shared::constants::{DEFAULT_OVERLAY_COLOR, DEFAULT_OVERLAY_THICKNESS};
use crate::shared::frame::Frame;

/// Outlines each face with a rectangle.
///
/// Thicker outlines grow inward so the drawn pixels stay inside the box.
pub struct RectangleOverlayRenderer {
    color: Color,
    thickness: u32,
}

impl RectangleOverlayRenderer {
    pub fn new(color: Color, thickness: u32) -> Self {
        Self {
            color,
            thickness: thickness.max(1),
        }
    }
}

impl Default for RectangleOverlayRenderer {
    fn default() -> Self {
        Self::new(Color::from(DEFAULT_OVERLAY_COLOR), DEFAULT_OVERLAY_THICKNESS)
    }
}

impl OverlayRenderer for RectangleOverlayRenderer {
    fn draw(
        &self,
        frame: &mut Frame,
        faces: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if frame.is_empty() || faces.is_empty() {
            return Ok(());
        }

        let (width, height) = (frame.width(), frame.height());
        let mut canvas =
            ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, height, frame.data_mut())
                .ok_or("Frame data does not match its dimensions")?;
        let color = Rgb([self.color.r, self.color.g, self.color.b]);

        for face in faces {
            for inset in 0..self.thickness as i32 {
                let w = face.width - 2 * inset;
                let h = face.height - 2 * inset;
                if w <= 0 || h <= 0 {
                    break;
                }
                let rect = Rect::at(face.x + inset, face.y + inset).of_size(w as u32, h as u32);
                draw_hollow_rect_mut(&mut canvas, rect, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Color = Color::new(10, 10, 10);
    const RED: Color = Color::new(255, 0, 0);

    fn frame() -> Frame {
        Frame::filled(20, 20, BG, 0)
    }

    #[test]
    fn test_outline_drawn_on_box_edges() {
        let mut f = frame();
        RectangleOverlayRenderer::default()
            .draw(&mut f, &[BoundingBox::new(2, 3, 10, 5)])
            .unwrap();

        assert_eq!(f.pixel(3, 2), RED); // top-left
        assert_eq!(f.pixel(7, 11), RED); // bottom-right
        assert_eq!(f.pixel(3, 11), RED); // top-right
        assert_eq!(f.pixel(5, 5), BG); // interior
        assert_eq!(f.pixel(0, 0), BG); // outside
        assert_eq!(f.pixel(8, 2), BG); // just below
    }

    #[test]
    fn test_thickness_grows_inward() {
        let mut f = frame();
        RectangleOverlayRenderer::new(RED, 2)
            .draw(&mut f, &[BoundingBox::new(2, 2, 10, 10)])
            .unwrap();

        assert_eq!(f.pixel(3, 3), RED);
        assert_eq!(f.pixel(4, 4), BG);
        assert_eq!(f.pixel(1, 1), BG);
    }

    #[test]
    fn test_box_reaching_frame_edge() {
        let mut f = frame();
        RectangleOverlayRenderer::default()
            .draw(&mut f, &[BoundingBox::new(14, 14, 6, 6)])
            .unwrap();
        assert_eq!(f.pixel(19, 19), RED);
    }

    #[test]
    fn test_zero_sized_box_skipped() {
        let mut f = frame();
        RectangleOverlayRenderer::default()
            .draw(&mut f, &[BoundingBox::new(5, 5, 0, 4)])
            .unwrap();
        assert!(f.data().chunks(3).all(|px| px == [10, 10, 10]));
    }

    #[test]
    fn test_custom_color() {
        let mut f = frame();
        let green = Color::new(0, 255, 0);
        RectangleOverlayRenderer::new(green, 1)
            .draw(&mut f, &[BoundingBox::new(0, 0, 3, 3)])
            .unwrap();
        assert_eq!(f.pixel(0, 0), green);
    }

    #[test]
    fn test_empty_frame_is_noop() {
        let mut f = Frame::new(Vec::new(), 0, 0, 0);
        assert!(RectangleOverlayRenderer::default()
            .draw(&mut f, &[BoundingBox::new(0, 0, 3, 3)])
            .is_ok());
    }
}
