use crate::color::ColorSpace;
use crate::error::ColorFormatError;
use crate::Float;

/// Parse a 24-bit color in hashed hexadecimal format. If successful, this
/// function returns the three coordinates as unsigned bytes. It transparently
/// handles single-digit coordinates.
fn parse_hashed(s: &str) -> Result<[u8; 3], ColorFormatError> {
    if !s.starts_with('#') {
        return Err(ColorFormatError::UnknownFormat);
    } else if s.len() != 4 && s.len() != 7 {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    fn parse_coordinate(s: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = s.len() / 3;
        let t = s
            .get(1 + factor * index..1 + factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(s, 0)?;
    let c2 = parse_coordinate(s, 1)?;
    let c3 = parse_coordinate(s, 2)?;
    Ok([c1, c2, c3])
}

// --------------------------------------------------------------------------------------------------------------------

const COLOR_SPACES: [(&str, ColorSpace); 5] = [
    ("srgb", ColorSpace::Srgb),
    ("linear-srgb", ColorSpace::LinearSrgb),
    ("display-p3", ColorSpace::DisplayP3),
    ("--linear-display-p3", ColorSpace::LinearDisplayP3),
    ("xyz", ColorSpace::Xyz),
];

/// Parse a subset of valid CSS color formats. This function recognizes only
/// the `color()` function. Its color space must be `srgb`, `linear-srgb`,
/// `display-p3`, `xyz`, or the non-standard `--linear-display-p3`. Coordinates
/// must not have units including `%`.
fn parse_css(s: &str) -> Result<(ColorSpace, [Float; 3]), ColorFormatError> {
    let rest = s
        .strip_prefix("color")
        .ok_or(ColorFormatError::UnknownFormat)?;

    // Munge parentheses after trimming leading whitespace
    let rest = rest
        .trim_start()
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.strip_suffix(')')
                .ok_or(ColorFormatError::NoClosingParenthesis)
        })?;

    // Munge color space
    let rest = rest.trim_start();
    let (space, body) = COLOR_SPACES
        .iter()
        .filter_map(|(p, s)| rest.strip_prefix(p).map(|r| (*s, r)))
        .next()
        .ok_or(ColorFormatError::UnknownColorSpace)?;

    #[inline]
    fn parse_coordinate(s: Option<&str>, _: usize) -> Result<Float, ColorFormatError> {
        s.ok_or(ColorFormatError::MissingCoordinate)
            .and_then(|t| t.parse().map_err(|_| ColorFormatError::MalformedFloat))
    }

    // Munge coordinates. Iterator eats all leading or trailing white space.
    let mut iter = body.split_whitespace();
    let c1 = parse_coordinate(iter.next(), 0)?;
    let c2 = parse_coordinate(iter.next(), 1)?;
    let c3 = parse_coordinate(iter.next(), 2)?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    Ok((space, [c1, c2, c3]))
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse the string into a color.
///
/// This function recognizes the three and six digit hashed hexadecimal format,
/// which denotes an sRGB color, as well as the modern syntax for the `color()`
/// CSS function with space-separated arguments. Before trying to parse either
/// of these formats, this function trims leading and trailing white space and
/// converts ASCII letters to lowercase.
pub(crate) fn parse(s: &str) -> Result<(ColorSpace, [Float; 3]), ColorFormatError> {
    let lowercase = s.trim().to_ascii_lowercase(); // Keep around for fn scope
    let s = lowercase.as_str();

    if s.starts_with('#') {
        let [c1, c2, c3] = parse_hashed(s)?;
        Ok((
            ColorSpace::Srgb,
            [
                c1 as Float / 255.0,
                c2 as Float / 255.0,
                c3 as Float / 255.0,
            ],
        ))
    } else {
        parse_css(s)
    }
}

// --------------------------------------------------------------------------------------------------------------------

fn css_prefix(space: ColorSpace) -> &'static str {
    use ColorSpace::*;
    match space {
        Srgb => "color(srgb ",
        LinearSrgb => "color(linear-srgb ",
        DisplayP3 => "color(display-p3 ",
        LinearDisplayP3 => "color(--linear-display-p3 ",
        Xyz => "color(xyz ",
    }
}

/// Format the color as a string.
///
/// This function formats the given coordinates for the given color space as a
/// CSS color with the `color()` function and space-separated arguments. It
/// respects the formatter's precision, defaulting to 5 digits past the
/// decimal.
pub(crate) fn format(
    space: ColorSpace,
    coordinates: &[Float; 3],
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    f.write_fmt(format_args!("{}", css_prefix(space)))?;

    let factor = (10.0 as Float).powi(f.precision().unwrap_or(5) as i32);
    for (index, coordinate) in coordinates.iter().enumerate() {
        // CSS mandates NO trailing zeros whatsoever. But formatting floats
        // with a precision produces trailing zeros. Rounding avoids them, for
        // the most part. If the fractional part is zero, we do need an
        // explicit precision---of zero!
        let c = (coordinate * factor).round() / factor;
        if c == c.trunc() {
            f.write_fmt(format_args!("{:.0}", c))?;
        } else {
            f.write_fmt(format_args!("{}", c))?;
        }

        if index < 2 {
            f.write_str(" ")?;
        }
    }

    f.write_str(")")
}

/// Format the 24-bit channels in hashed hexadecimal format, i.e., as a
/// 7-character `#rrggbb` string.
pub(crate) fn format_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{format_hex, parse, parse_css, parse_hashed, ColorFormatError};
    use crate::color::ColorSpace::*;
    use crate::Float;

    #[test]
    fn test_parse_hashed() -> Result<(), ColorFormatError> {
        assert_eq!(parse_hashed("#123")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hashed("#112233")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hashed("fff"), Err(ColorFormatError::UnknownFormat));
        assert_eq!(
            parse_hashed("#ff"),
            Err(ColorFormatError::UnexpectedCharacters)
        );

        let result = parse_hashed("#0g0");
        assert!(matches!(result, Err(ColorFormatError::MalformedHex)));

        Ok(())
    }

    #[test]
    fn test_parse_css() {
        assert_eq!(
            parse_css("color(srgb 1 0 0)"),
            Ok((Srgb, [1.0, 0.0, 0.0]))
        );
        assert_eq!(
            parse_css("color(  display-p3   1  0.123  0.3333   )"),
            Ok((DisplayP3, [1.0, 0.123, 0.3333]))
        );
        assert_eq!(
            parse_css("whatever(1 1 1)"),
            Err(ColorFormatError::UnknownFormat)
        );
        assert_eq!(
            parse_css("colorsrgb 1 1 1)"),
            Err(ColorFormatError::NoOpeningParenthesis)
        );
        assert_eq!(
            parse_css("color(srgb 1 1 1"),
            Err(ColorFormatError::NoClosingParenthesis)
        );
        assert_eq!(
            parse_css("color(nemo 1 1 1)"),
            Err(ColorFormatError::UnknownColorSpace)
        );
        assert!(matches!(
            parse_css("color(srgb abc 1 1)"),
            Err(ColorFormatError::MalformedFloat)
        ));
        assert_eq!(
            parse_css("color(srgb 1)"),
            Err(ColorFormatError::MissingCoordinate)
        );
        assert_eq!(
            parse_css("color(srgb 1 1 1 1)"),
            Err(ColorFormatError::TooManyCoordinates)
        );
    }

    #[test]
    fn test_parse() -> Result<(), ColorFormatError> {
        assert_eq!(
            parse("  #FF0000  ")?,
            (Srgb, [1.0 as Float, 0.0, 0.0])
        );
        assert_eq!(
            parse(" COLOR( Display-P3 0.1 0.2 0.3 ) ")?,
            (DisplayP3, [0.1 as Float, 0.2, 0.3])
        );
        Ok(())
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex([255, 0, 0]), "#ff0000");
        assert_eq!(format_hex([0x80, 0x80, 0x80]), "#808080");
        assert_eq!(format_hex([1, 2, 3]), "#010203");
    }
}
