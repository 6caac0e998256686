use crate::color::ColorSpace;
use crate::Float;

/// Determine whether the coordinates are in gamut for their color space.
pub(crate) fn in_gamut(space: ColorSpace, coordinates: &[Float; 3]) -> bool {
    if space.is_rgb() {
        coordinates.iter().all(|c| 0.0 <= *c && *c <= 1.0)
    } else {
        true
    }
}

/// Clip the coordinates to the gamut of their color space.
///
/// Clipping clamps out-of-range channels instead of wrapping them. Callers
/// that need to surface the loss of information should test with [`in_gamut`]
/// first and flag the result.
pub(crate) fn clip(space: ColorSpace, coordinates: &[Float; 3]) -> [Float; 3] {
    if space.is_rgb() {
        let [r, g, b] = coordinates;
        [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
    } else {
        *coordinates
    }
}

#[cfg(test)]
mod test {
    use super::{clip, in_gamut};
    use crate::color::ColorSpace;

    #[test]
    fn test_in_gamut() {
        assert!(in_gamut(ColorSpace::Srgb, &[0.0, 0.5, 1.0]));
        assert!(!in_gamut(ColorSpace::Srgb, &[-0.1, 0.5, 1.0]));
        assert!(!in_gamut(ColorSpace::DisplayP3, &[0.0, 0.5, 1.1]));
        // XYZ is unbounded.
        assert!(in_gamut(ColorSpace::Xyz, &[-1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_clip() {
        assert_eq!(
            clip(ColorSpace::Srgb, &[-0.1, 0.5, 1.1]),
            [0.0, 0.5, 1.0],
            "clipping clamps channels to unit range"
        );
        assert_eq!(
            clip(ColorSpace::Xyz, &[-1.0, 2.0, 3.0]),
            [-1.0, 2.0, 3.0],
            "XYZ passes through unchanged"
        );
    }
}
