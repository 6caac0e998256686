use std::str::FromStr;

use crate::core::{clip, convert, format, format_hex, from_24bit, in_gamut, parse, to_24bit,
    to_eq_coordinates};
use crate::error::ColorFormatError;
use crate::Float;

/// Create a new sRGB color from 24-bit integer coordinates.
///
/// Like [`Color::from_24bit`], this macro creates a new color from 24-bit
/// integer coordinates. However, it also is safe to use in const expressions.
#[macro_export]
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        $crate::Color::new(
            $crate::ColorSpace::Srgb,
            [
                $r as $crate::Float / 255.0,
                $g as $crate::Float / 255.0,
                $b as $crate::Float / 255.0,
            ],
        )
    };
}

// ====================================================================================================================

/// The enumeration of supported color spaces.
///
/// This crate supports the two gamma-corrected RGB color spaces a display
/// color can be requested in, each paired with its linear form, plus the XYZ
/// root they convert through:
///
///   * [sRGB](https://en.wikipedia.org/wiki/SRGB), which has long served as
///     the default color space for the web;
///   * [Display P3](https://en.wikipedia.org/wiki/DCI-P3), a wider gamut with
///     different primaries, common on modern displays;
///   * [XYZ D65](https://en.wikipedia.org/wiki/CIE_1931_color_space), the
///     foundational color space all conversions go through.
///
/// For the four RGB color spaces, in-gamut coordinates range from 0 to 1,
/// inclusive. The two gamuts differ: conversion between sRGB and Display P3
/// is a genuine chromatic transform, never an identity. XYZ is unbounded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Srgb,
    LinearSrgb,
    DisplayP3,
    LinearDisplayP3,
    Xyz,
}

impl ColorSpace {
    /// Determine whether this color space is RGB.
    ///
    /// RGB color spaces are additive and have red, green, and blue
    /// coordinates. In-gamut colors have coordinates in unit range `0..=1`.
    pub const fn is_rgb(&self) -> bool {
        use ColorSpace::*;
        matches!(*self, Srgb | LinearSrgb | DisplayP3 | LinearDisplayP3)
    }

    /// Determine whether this color space is bounded.
    ///
    /// XYZ is *unbounded* and hence can model any color. By contrast, RGB
    /// color spaces are *bounded*, with coordinates of in-gamut colors
    /// ranging `0..=1`.
    pub const fn is_bounded(&self) -> bool {
        self.is_rgb()
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ColorSpace::*;

        let s = match self {
            Srgb => "sRGB",
            LinearSrgb => "linear sRGB",
            DisplayP3 => "Display P3",
            LinearDisplayP3 => "linear Display P3",
            Xyz => "XYZ D65",
        };

        f.write_str(s)
    }
}

// ====================================================================================================================

/// A high-resolution color object.
///
/// Every color object has a [color space](ColorSpace) and three coordinates.
/// A coordinate triple is only meaningful together with its space; the same
/// numbers name different colors in sRGB and Display P3. For RGB color
/// spaces, the coordinates of in-gamut colors have unit range.
///
/// # Equality Testing and Hashing
///
/// To ensure that equal colors also have equal hashes, this class performs
/// the following steps to prepare coordinates for either operation:
///
///   * To turn coordinates into comparable entities, replace not-a-numbers
///     with positive zero;
///   * To allow for floating point error, scale and round, which drops the
///     least significant digit;
///   * To make zeros comparable, replace negative zero with positive zero
///     (but only after rounding, which may produce zeros);
///   * To convince Rust that coordinates are comparable, convert to bits.
#[derive(Clone, Copy, Debug)]
pub struct Color {
    space: ColorSpace,
    coordinates: [Float; 3],
}

impl Color {
    /// Instantiate a new color with the given color space and coordinates.
    ///
    /// ```
    /// # use trilemma::{Color, ColorSpace};
    /// let coral = Color::new(ColorSpace::Srgb, [1.0, 0.5, 0.31]);
    /// assert_eq!(coral.space(), ColorSpace::Srgb);
    /// ```
    #[inline]
    pub const fn new(space: ColorSpace, coordinates: [Float; 3]) -> Self {
        Self { space, coordinates }
    }

    /// Instantiate a new sRGB color with the given red, green, and blue
    /// coordinates.
    ///
    /// ```
    /// # use trilemma::{Color, ColorSpace};
    /// let fire_brick = Color::srgb(177.0/255.0, 31.0/255.0, 36.0/255.0);
    /// assert_eq!(fire_brick.space(), ColorSpace::Srgb);
    /// ```
    pub const fn srgb(r: Float, g: Float, b: Float) -> Self {
        Self::new(ColorSpace::Srgb, [r, g, b])
    }

    /// Instantiate a new Display P3 color with the given red, green, and blue
    /// coordinates.
    ///
    /// ```
    /// # use trilemma::{Color, ColorSpace};
    /// let cyan = Color::p3(0.0, 0.87, 0.85);
    /// assert_eq!(cyan.space(), ColorSpace::DisplayP3);
    /// ```
    pub const fn p3(r: Float, g: Float, b: Float) -> Self {
        Self::new(ColorSpace::DisplayP3, [r, g, b])
    }

    /// Instantiate a new sRGB color from its 24-bit representation.
    ///
    /// This function returns a new sRGB color with the given red, green, and
    /// blue coordinates scaled by 1/255. The [`rgb`] macro does the same
    /// thing but is safe to use inside const expressions.
    ///
    /// ```
    /// # use trilemma::Color;
    /// let tangerine = Color::from_24bit(0xff, 0x93, 0x00);
    /// assert_eq!(tangerine, Color::srgb(1.0, 0.5764705882352941, 0.0));
    /// ```
    #[inline]
    pub fn from_24bit(r: u8, g: u8, b: u8) -> Self {
        Self::new(ColorSpace::Srgb, from_24bit(r, g, b))
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Access the color space.
    #[inline]
    pub const fn space(&self) -> ColorSpace {
        self.space
    }

    /// Convert this color to the target color space.
    ///
    /// Conversion between the two gamma-corrected RGB color spaces goes
    /// through linear light and XYZ with the standard primaries matrices; it
    /// does not check whether the result is in gamut for the target. The
    /// round trip from sRGB through Display P3 and back reproduces the
    /// original within 1e-4 per channel.
    ///
    /// ```
    /// # use trilemma::{Color, ColorSpace};
    /// let red = Color::srgb(1.0, 0.0, 0.0);
    /// let p3_red = red.to(ColorSpace::DisplayP3);
    /// assert!(p3_red.as_ref()[0] < 0.96); // sRGB red is inside the P3 gamut
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn to(&self, space: ColorSpace) -> Self {
        Self::new(space, convert(self.space, space, &self.coordinates))
    }

    /// Determine whether this color is in gamut for its color space.
    ///
    /// ```
    /// # use trilemma::{Color, ColorSpace};
    /// let too_green = Color::p3(0.0, 1.0, 0.0).to(ColorSpace::Srgb);
    /// assert!(!too_green.in_gamut());
    /// ```
    #[inline]
    pub fn in_gamut(&self) -> bool {
        in_gamut(self.space, &self.coordinates)
    }

    /// Clip this color to the gamut of its color space.
    ///
    /// Out-of-range channels clamp to unit range; they never wrap. Use
    /// [`in_gamut`](Color::in_gamut) beforehand to flag the loss.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn clip(&self) -> Self {
        Self::new(self.space, clip(self.space, &self.coordinates))
    }

    /// Convert this color to its 24-bit representation.
    ///
    /// This method assumes that the color is an in-gamut RGB color; even if
    /// it is not, channels clamp to `0x00..=0xff`. Channels round
    /// half-away-from-zero, which makes [`Color::from_24bit`] followed by
    /// this method the identity on all 16,777,216 such colors.
    pub fn to_24bit(&self) -> [u8; 3] {
        to_24bit(&self.coordinates)
    }

    /// Format this color as a hashed hexadecimal string.
    ///
    /// The result is a 7-character `#rrggbb` string for this color's 24-bit
    /// representation. Parsing the string back yields the same 24 bits.
    ///
    /// ```
    /// # use trilemma::Color;
    /// assert_eq!(Color::srgb(1.0, 0.0, 0.0).to_hex(), "#ff0000");
    /// ```
    pub fn to_hex(&self) -> String {
        format_hex(self.to_24bit())
    }
}

// --------------------------------------------------------------------------------------------------------------------

impl Default for Color {
    /// The default color: black, i.e., the origin of the XYZ color space.
    fn default() -> Self {
        Self::new(ColorSpace::Xyz, [0.0, 0.0, 0.0])
    }
}

impl AsRef<[Float; 3]> for Color {
    /// Access this color's coordinates by reference.
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl FromStr for Color {
    type Err = ColorFormatError;

    /// Parse a color from its string representation.
    ///
    /// This method recognizes the three and six digit hashed hexadecimal
    /// format for sRGB colors and the CSS `color()` function for the
    /// supported color spaces.
    ///
    /// ```
    /// # use trilemma::{Color, ColorSpace};
    /// let red: Color = "#ff0000".parse()?;
    /// assert_eq!(red, Color::srgb(1.0, 0.0, 0.0));
    /// # Ok::<(), trilemma::error::ColorFormatError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).map(|(space, coordinates)| Color::new(space, coordinates))
    }
}

impl std::fmt::Display for Color {
    /// Format this color with the CSS `color()` function and space-separated
    /// arguments, respecting the formatter's precision.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format(self.space, &self.coordinates, f)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.space == other.space
            && to_eq_coordinates(&self.coordinates) == to_eq_coordinates(&other.coordinates)
    }
}

impl Eq for Color {}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.space.hash(state);
        to_eq_coordinates(&self.coordinates).hash(state);
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Color, ColorSpace};

    #[test]
    fn test_hex_round_trip() -> Result<(), crate::error::ColorFormatError> {
        let red = Color::srgb(1.0, 0.0, 0.0);
        assert_eq!(red.to_hex(), "#ff0000");
        assert_eq!("#ff0000".parse::<Color>()?, red);

        // Encoding and decoding invert each other bit for bit.
        for channel in [0x00_u8, 0x01, 0x7f, 0x80, 0xca, 0xff] {
            let color = Color::from_24bit(channel, 0xff - channel, channel / 3);
            assert_eq!(color.to_hex().parse::<Color>()?, color);
            assert_eq!(
                color.to_24bit(),
                [channel, 0xff - channel, channel / 3],
                "24-bit round trip must be lossless"
            );
        }

        Ok(())
    }

    #[test]
    fn test_display() {
        let color = Color::srgb(0.3, 0.336, 0.123456);
        assert_eq!(color.to_string(), "color(srgb 0.3 0.336 0.12346)");
        assert_eq!(format!("{:.2}", color), "color(srgb 0.3 0.34 0.12)");
        assert_eq!(
            Color::p3(1.0, 0.0, 0.0).to_string(),
            "color(display-p3 1 0 0)"
        );
    }

    #[test]
    fn test_p3_round_trip_is_close() {
        let p3_green = Color::p3(0.0, 1.0, 0.0);
        let srgb = p3_green.to(ColorSpace::Srgb);
        assert!(!srgb.in_gamut(), "P3 green lies outside the sRGB gamut");

        let back = srgb.to(ColorSpace::DisplayP3);
        for (a, b) in back.as_ref().iter().zip(p3_green.as_ref().iter()) {
            assert!((a - b).abs() <= 1e-4, "round trip must stay within 1e-4");
        }

        // Clipping the out-of-gamut intermediate, however, is lossy.
        assert!(srgb.clip().in_gamut());
        assert_ne!(srgb.clip(), srgb);
    }

    #[test]
    fn test_rgb_macro() {
        const GRAY: Color = crate::rgb!(128, 128, 128);
        assert_eq!(GRAY, Color::srgb(0.5019607843137255, 0.5019607843137255, 0.5019607843137255));
    }
}
