use crate::color::{Color, ColorSpace};
use crate::error::WeightsError;
use crate::rgb;
use crate::triangle::Quality;
use crate::weights::Weights;
use crate::Float;

/// The three reference colors of the trade-off triangle.
///
/// A palette binds each [`Quality`] to one color, in the same order as the
/// triangle binds vertices. The colors may live in any color space;
/// [`blend`](Palette::blend) converts them on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [Color; 3],
}

/// The result of blending a palette.
///
/// If the exact mixture falls outside the gamut of the requested color space,
/// `color` holds the clipped version and `out_of_gamut` is `true`. Clipping
/// clamps channels to unit range; it never wraps them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Blend {
    pub color: Color,
    pub out_of_gamut: bool,
}

impl Palette {
    /// The default palette: the pure sRGB primaries, with red for privacy,
    /// green for performance, and blue for personalization.
    pub const DEFAULT: Palette = Palette::new([rgb!(255, 0, 0), rgb!(0, 255, 0), rgb!(0, 0, 255)]);

    /// Create a new palette with the given colors, in [`Quality`] order.
    #[inline]
    pub const fn new(colors: [Color; 3]) -> Self {
        Self { colors }
    }

    /// Access the reference color owned by the given quality.
    #[inline]
    pub const fn color(&self, quality: Quality) -> Color {
        self.colors[quality as usize]
    }

    /// Blend the palette with the given weights in the given color space.
    ///
    /// This method validates the weights, converts the three reference colors
    /// to the target color space, and mixes them channel by channel. Blending
    /// with a unit triple reproduces the corresponding reference color
    /// exactly. If the mixture lands outside the target gamut, which happens
    /// when a reference color does not fit that gamut, the result carries the
    /// clipped color and the `out_of_gamut` flag.
    ///
    /// Mixing happens on the coordinates of the target space as given, i.e.,
    /// gamma-encoded for sRGB and Display P3. That matches the behavior of
    /// CSS gradients without an explicit interpolation space and of the
    /// canvas rendering this crate models.
    pub fn blend(&self, weights: Weights, space: ColorSpace) -> Result<Blend, WeightsError> {
        weights.validate()?;

        let mut coordinates = [0.0 as Float; 3];
        for quality in Quality::ALL {
            let color = self.color(quality).to(space);
            let weight = weights.get(quality);
            for (sum, coordinate) in coordinates.iter_mut().zip(color.as_ref()) {
                *sum = weight.mul_add(*coordinate, *sum);
            }
        }

        let color = Color::new(space, coordinates);
        if color.in_gamut() {
            Ok(Blend {
                color,
                out_of_gamut: false,
            })
        } else {
            log::warn!(
                "blend of {:?} in {} landed out of gamut at {}",
                weights,
                space,
                color
            );
            Ok(Blend {
                color: color.clip(),
                out_of_gamut: true,
            })
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::Palette;
    use crate::color::{Color, ColorSpace};
    use crate::error::WeightsError;
    use crate::triangle::Quality;
    use crate::weights::Weights;

    #[test]
    fn test_unit_weights_reproduce_references() -> Result<(), WeightsError> {
        let palette = Palette::DEFAULT;

        for quality in Quality::ALL {
            let blend = palette.blend(Weights::unit(quality), ColorSpace::Srgb)?;
            assert_eq!(
                blend.color,
                palette.color(quality),
                "unit weights for {} must reproduce the reference color",
                quality
            );
            assert!(!blend.out_of_gamut);
        }

        Ok(())
    }

    #[test]
    fn test_balanced_blend_is_gray() -> Result<(), WeightsError> {
        let blend = Palette::DEFAULT.blend(Weights::BALANCED, ColorSpace::Srgb)?;
        let [r, g, b] = *blend.color.as_ref();
        assert!((r - 1.0 / 3.0).abs() <= 1e-9);
        assert!((g - 1.0 / 3.0).abs() <= 1e-9);
        assert!((b - 1.0 / 3.0).abs() <= 1e-9);
        assert!(!blend.out_of_gamut);
        Ok(())
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        // Sum 1.5 is an error, not a silently renormalized blend.
        assert_eq!(
            Palette::DEFAULT.blend(Weights::new(0.5, 0.5, 0.5), ColorSpace::Srgb),
            Err(WeightsError::NotNormalized(1.5))
        );
        assert_eq!(
            Palette::DEFAULT.blend(Weights::new(-0.5, 1.0, 0.5), ColorSpace::Srgb),
            Err(WeightsError::Negative(Quality::Privacy, -0.5))
        );
    }

    #[test]
    fn test_out_of_gamut_blend_is_clipped() -> Result<(), WeightsError> {
        // A palette of P3 primaries does not fit the sRGB gamut.
        let palette = Palette::new([
            Color::p3(1.0, 0.0, 0.0),
            Color::p3(0.0, 1.0, 0.0),
            Color::p3(0.0, 0.0, 1.0),
        ]);

        let blend = palette.blend(Weights::unit(Quality::Performance), ColorSpace::Srgb)?;
        assert!(blend.out_of_gamut, "P3 green exceeds the sRGB gamut");
        assert!(blend.color.in_gamut(), "the result is clipped into gamut");

        // The same blend fits trivially in its native space.
        let native = palette.blend(Weights::unit(Quality::Performance), ColorSpace::DisplayP3)?;
        assert!(!native.out_of_gamut);
        assert_eq!(native.color, Color::p3(0.0, 1.0, 0.0));

        Ok(())
    }
}
