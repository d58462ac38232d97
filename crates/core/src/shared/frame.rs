use ndarray::ArrayView3;

use crate::shared::color::Color;

const RGB_CHANNELS: usize = 3;

/// A single video/image frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only. A frame may have zero
/// width or height; detection treats that as an empty image, not an error.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * RGB_CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// Builds a frame where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: Color, index: usize) -> Self {
        let pixels = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixels * RGB_CHANNELS);
        for _ in 0..pixels {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self::new(data, width, height, index)
    }

    pub fn from_rgb_image(image: image::RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rows(&self) -> usize {
        self.height as usize
    }

    pub fn cols(&self) -> usize {
        self.width as usize
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at `(row, col)`. Panics when out of bounds.
    pub fn pixel(&self, row: usize, col: usize) -> Color {
        let offset = (row * self.cols() + col) * RGB_CHANNELS;
        Color::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        )
    }

    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color) {
        let offset = (row * self.cols() + col) * RGB_CHANNELS;
        self.data[offset..offset + RGB_CHANNELS].copy_from_slice(&[color.r, color.g, color.b]);
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.rows(), self.cols(), RGB_CHANNELS)
    }
}
