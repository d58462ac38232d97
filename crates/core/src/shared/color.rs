/// A single RGB pixel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Approximate hue angle in degrees, in `[0, 360)`.
    ///
    /// Uses the RGB-difference form `acos(((R-G) + (R-B)) / 2 / sqrt((R-G)² + (R-B)(G-B)))`,
    /// mirrored to `360 - θ` when blue exceeds green. Returns `None` for
    /// achromatic pixels (`R = G = B`), where the denominator vanishes.
    pub fn hue_degrees(&self) -> Option<f64> {
        let a = self.r as f64 - self.g as f64;
        let b = self.r as f64 - self.b as f64;
        let c = self.g as f64 - self.b as f64;

        let denominator = (a * a + b * c).sqrt();
        if denominator == 0.0 {
            return None;
        }

        // Rounding can push the ratio a hair outside acos's domain.
        let cos_theta = (0.5 * (a + b) / denominator).clamp(-1.0, 1.0);
        let theta = cos_theta.acos().to_degrees();

        if self.b <= self.g {
            Some(theta)
        } else {
            Some(360.0 - theta)
        }
    }

    /// Mean of the three channels on the 0-255 scale.
    pub fn intensity(&self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::gray(Color::new(128, 128, 128))]
    #[case::black(Color::new(0, 0, 0))]
    #[case::white(Color::new(255, 255, 255))]
    fn test_hue_undefined_for_achromatic(#[case] color: Color) {
        assert_eq!(color.hue_degrees(), None);
    }

    #[test]
    fn test_hue_pure_red_is_zero() {
        assert_relative_eq!(Color::new(255, 0, 0).hue_degrees().unwrap(), 0.0);
    }

    #[test]
    fn test_hue_pure_green_is_120() {
        let hue = Color::new(0, 255, 0).hue_degrees().unwrap();
        assert_relative_eq!(hue, 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hue_pure_blue_mirrors_to_240() {
        let hue = Color::new(0, 0, 255).hue_degrees().unwrap();
        assert_relative_eq!(hue, 240.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hue_of_warm_tone() {
        // a=50, b=70, c=20 -> cos = 60 / sqrt(3900)
        let hue = Color::new(220, 170, 150).hue_degrees().unwrap();
        let expected = (60.0 / 3900.0_f64.sqrt()).acos().to_degrees();
        assert_relative_eq!(hue, expected, epsilon = 1e-12);
        assert!(hue < 20.0);
    }

    #[test]
    fn test_hue_always_finite_for_chromatic_pixels() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(17) {
                    let c = Color::new(r as u8, g as u8, b as u8);
                    if let Some(h) = c.hue_degrees() {
                        assert!(h.is_finite(), "{c:?} produced {h}");
                        assert!((0.0..=360.0).contains(&h));
                    }
                }
            }
        }
    }

    #[test]
    fn test_intensity_is_channel_mean() {
        assert_relative_eq!(Color::new(30, 60, 90).intensity(), 60.0);
    }

    #[test]
    fn test_from_array() {
        assert_eq!(Color::from([1, 2, 3]), Color::new(1, 2, 3));
    }
}
