use ndarray::{s, Array2};

use crate::shared::color::Color;

use crate::detection::domain::pixel_classifier::{is_hair_pixel, is_skin_pixel};
use crate::shared::frame::Frame;

/// Downsampled skin and hair masks for one frame.
///
/// Both grids have shape `(rows / group_width, cols / group_width)`; a cell is
/// set when at least half of a full cell's pixels matched the predicate.
#[derive(Clone, Debug, PartialEq)]
pub struct ToneMasks {
    pub skin: Array2<bool>,
    pub hair: Array2<bool>,
}

impl ToneMasks {
    /// `(grid_rows, grid_cols)`.
    pub fn dim(&self) -> (usize, usize) {
        self.skin.dim()
    }
}

/// Classifies every `group_width × group_width` cell by majority vote.
///
/// Pixels of a cell that fall outside the frame are skipped, but the vote
/// threshold is always half of the *full* cell area (integer division), so
/// partial cells need a higher density to qualify. `group_width` must be
/// positive; callers validate it.
pub fn aggregate(frame: &Frame, group_width: usize) -> ToneMasks {
    debug_assert!(group_width > 0, "group_width must be positive");

    let grid_rows = frame.rows() / group_width;
    let grid_cols = frame.cols() / group_width;
    let threshold = group_width * group_width / 2;

    let pixels = frame.as_ndarray();
    let mut skin = Array2::from_elem((grid_rows, grid_cols), false);
    let mut hair = Array2::from_elem((grid_rows, grid_cols), false);

    for gi in 0..grid_rows {
        let row_start = gi * group_width;
        let row_end = (row_start + group_width).min(frame.rows());

        for gj in 0..grid_cols {
            let col_start = gj * group_width;
            let col_end = (col_start + group_width).min(frame.cols());
            let cell = pixels.slice(s![row_start..row_end, col_start..col_end, ..]);

            let mut skin_count = 0;
            let mut hair_count = 0;
            for px in cell.rows() {
                let color = Color::new(px[0], px[1], px[2]);
                if is_skin_pixel(color) {
                    skin_count += 1;
                }
                if is_hair_pixel(color) {
                    hair_count += 1;
                }
            }

            skin[[gi, gj]] = skin_count >= threshold;
            hair[[gi, gj]] = hair_count >= threshold;
        }
    }

    ToneMasks { skin, hair }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SKIN: Color = Color::new(110, 80, 70);
    const HAIR: Color = Color::new(40, 30, 20);
    const NEITHER: Color = Color::new(128, 128, 128);

    /// A single `group_width` cell whose first `skin_pixels` pixels are skin.
    fn cell_with_skin_pixels(group_width: u32, skin_pixels: usize) -> Frame {
        let mut frame = Frame::filled(group_width, group_width, NEITHER, 0);
        let gw = group_width as usize;
        for i in 0..skin_pixels {
            frame.set_pixel(i / gw, i % gw, SKIN);
        }
        frame
    }

    #[test]
    fn test_grid_dimensions_floor_divide() {
        let frame = Frame::filled(23, 15, NEITHER, 0);
        let masks = aggregate(&frame, 7);
        assert_eq!(masks.dim(), (2, 3));
        assert_eq!(masks.hair.dim(), (2, 3));
    }

    #[test]
    fn test_empty_frame_yields_empty_grids() {
        let masks = aggregate(&Frame::new(Vec::new(), 0, 0, 0), 7);
        assert_eq!(masks.dim(), (0, 0));
    }

    #[test]
    fn test_frame_smaller_than_cell_yields_empty_grids() {
        let masks = aggregate(&Frame::filled(6, 6, SKIN, 0), 7);
        assert_eq!(masks.skin.len(), 0);
        assert_eq!(masks.hair.len(), 0);
    }

    #[test]
    fn test_fully_skin_cell_is_skin() {
        let masks = aggregate(&Frame::filled(7, 7, SKIN, 0), 7);
        assert!(masks.skin[[0, 0]]);
        assert!(!masks.hair[[0, 0]]);
    }

    #[rstest]
    #[case::one_below_threshold(23, false)]
    #[case::at_threshold(24, true)]
    #[case::above_threshold(25, true)]
    fn test_majority_threshold_is_inclusive(#[case] skin_pixels: usize, #[case] expected: bool) {
        // 7 * 7 / 2 = 24
        let masks = aggregate(&cell_with_skin_pixels(7, skin_pixels), 7);
        assert_eq!(masks.skin[[0, 0]], expected);
    }

    #[test]
    fn test_even_group_width_threshold() {
        // 4 * 4 / 2 = 8
        assert!(!aggregate(&cell_with_skin_pixels(4, 7), 4).skin[[0, 0]]);
        assert!(aggregate(&cell_with_skin_pixels(4, 8), 4).skin[[0, 0]]);
    }

    #[test]
    fn test_masks_filled_independently() {
        // Left cell hair, right cell skin.
        let mut frame = Frame::filled(14, 7, HAIR, 0);
        for row in 0..7 {
            for col in 7..14 {
                frame.set_pixel(row, col, SKIN);
            }
        }
        let masks = aggregate(&frame, 7);
        assert_eq!(masks.skin.row(0).to_vec(), vec![false, true]);
        assert_eq!(masks.hair.row(0).to_vec(), vec![true, false]);
    }

    #[test]
    fn test_trailing_pixels_beyond_last_cell_are_ignored() {
        // 10 columns with group width 7: columns 7..10 belong to no cell.
        let mut frame = Frame::filled(10, 7, NEITHER, 0);
        for row in 0..7 {
            for col in 7..10 {
                frame.set_pixel(row, col, SKIN);
            }
        }
        let masks = aggregate(&frame, 7);
        assert_eq!(masks.dim(), (1, 1));
        assert!(!masks.skin[[0, 0]]);
    }

    #[test]
    fn test_cell_position_maps_to_grid_index() {
        let mut frame = Frame::filled(21, 14, NEITHER, 0);
        for row in 7..14 {
            for col in 14..21 {
                frame.set_pixel(row, col, SKIN);
            }
        }
        let masks = aggregate(&frame, 7);
        let set: Vec<_> = masks
            .skin
            .indexed_iter()
            .filter(|(_, v)| **v)
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(set, vec![(1, 2)]);
    }

    #[test]
    fn test_unit_group_width_marks_every_cell() {
        // 1 * 1 / 2 = 0, so every cell passes the vote.
        let masks = aggregate(&Frame::filled(3, 2, NEITHER, 0), 1);
        assert!(masks.skin.iter().all(|&v| v));
        assert!(masks.hair.iter().all(|&v| v));
    }
}
