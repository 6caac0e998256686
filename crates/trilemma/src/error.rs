//! Utility module with trilemma's errors.
//!
//! Every error in this crate is a plain value. Callers branch on the variants
//! deterministically; no control flow crosses the module boundary through
//! panics.

use crate::triangle::{Point, Quality};
use crate::Float;

/// An erroneous color format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorFormatError {
    /// A color format that does not start with a known prefix such as `#` or
    /// `color(`.
    UnknownFormat,

    /// A color format with unexpected characters or an unexpected number of
    /// characters. For example, `#00` is missing a hexadecimal digit.
    UnexpectedCharacters,

    /// A parenthesized color format without the opening parenthesis. For
    /// example, `color srgb 0 0 0)` is missing the opening parenthesis.
    NoOpeningParenthesis,

    /// A parenthesized color format without the closing parenthesis. For
    /// example, `color(srgb 1 2 3` is missing the closing parenthesis.
    NoClosingParenthesis,

    /// A color format that is using an unknown color space. For example,
    /// `color(unknown 1 1 1)` uses an unknown color space.
    UnknownColorSpace,

    /// A color format that is missing a coordinate. For example,
    /// `color(srgb 0)` is missing the second and third coordinate.
    MissingCoordinate,

    /// A color format that has a malformed hexadecimal number as coordinate.
    /// For example, `#efg` has a malformed third coordinate.
    MalformedHex,

    /// A color format that has a malformed floating point number as
    /// coordinate. For example, `color(srgb 1.0 0..1 0.0)` has a malformed
    /// second coordinate.
    MalformedFloat,

    /// A color format with more than three coordinates. For example,
    /// `color(srgb 1 1 1 1)` has one coordinate too many.
    TooManyCoordinates,
}

impl std::fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColorFormatError::*;

        match self {
            UnknownFormat => f.write_str("color format should start with `#` or `color()`"),
            UnexpectedCharacters => {
                f.write_str("color format should contain only valid ASCII characters")
            }
            NoOpeningParenthesis => {
                f.write_str("color format should include an opening parenthesis but has none")
            }
            NoClosingParenthesis => {
                f.write_str("color format should include a closing parenthesis but has none")
            }
            UnknownColorSpace => {
                f.write_str("color format should have known color space but does not")
            }
            MissingCoordinate => {
                f.write_str("color format should have 3 coordinates but is missing one")
            }
            MalformedHex => {
                f.write_str("color format coordinates should be hexadecimal integers but are not")
            }
            MalformedFloat => {
                f.write_str("color format coordinates should be floating point numbers but are not")
            }
            TooManyCoordinates => f.write_str("color format should have 3 coordinates but has more"),
        }
    }
}

impl std::error::Error for ColorFormatError {}

// ====================================================================================================================

/// An error indicating a triangle whose vertices do not span an area.
///
/// Triangle geometry is configuration, not request data, so this error
/// surfaces at construction time and never at mapping time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateTriangleError {
    /// The offending vertices.
    pub vertices: [Point; 3],
}

impl std::fmt::Display for DegenerateTriangleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [v1, v2, v3] = self.vertices;
        f.write_fmt(format_args!(
            "triangle vertices ({}, {}), ({}, {}), ({}, {}) are collinear or coincident",
            v1.x, v1.y, v2.x, v2.y, v3.x, v3.y
        ))
    }
}

impl std::error::Error for DegenerateTriangleError {}

// ====================================================================================================================

/// An erroneous barycentric weight triple.
///
/// [`Weights`](crate::Weights) are plain values; points outside the triangle
/// legitimately produce negative components. This error surfaces when a
/// consumer that requires a convex combination, such as
/// [`Palette::blend`](crate::Palette::blend), receives a triple that is not
/// one. Validation rejects instead of silently normalizing, so that upstream
/// bugs stay visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeightsError {
    /// A weight component that is not a finite number.
    NotFinite(Quality),

    /// A negative weight component.
    Negative(Quality, Float),

    /// A weight triple whose sum strays from 1 by more than
    /// [`SUM_TOLERANCE`](crate::SUM_TOLERANCE).
    NotNormalized(Float),
}

impl std::fmt::Display for WeightsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightsError::NotFinite(quality) => f.write_fmt(format_args!(
                "{} weight should be a finite number but is not",
                quality
            )),
            WeightsError::Negative(quality, value) => f.write_fmt(format_args!(
                "{} weight should be non-negative but is {}",
                quality, value
            )),
            WeightsError::NotNormalized(sum) => f.write_fmt(format_args!(
                "weights should sum to 1 but sum to {}",
                sum
            )),
        }
    }
}

impl std::error::Error for WeightsError {}

// ====================================================================================================================

/// An error while answering a color query.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryError {
    /// A `mode` parameter that is neither `srgb` nor `p3`. Unrecognized modes
    /// are client errors; they do not silently fall back to a default space.
    InvalidMode(String),

    /// A weight triple rejected by the color mapper.
    InvalidWeights(WeightsError),
}

impl From<WeightsError> for QueryError {
    fn from(value: WeightsError) -> Self {
        QueryError::InvalidWeights(value)
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidMode(mode) => f.write_fmt(format_args!(
                "mode should be `srgb` or `p3` but is `{}`",
                mode
            )),
            QueryError::InvalidWeights(_) => f.write_str("query produced invalid weights"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::InvalidWeights(error) => Some(error),
            QueryError::InvalidMode(_) => None,
        }
    }
}
