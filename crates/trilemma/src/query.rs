//! The query interface of the trade-off visualization.
//!
//! This module ties the triangle and color mappers together: it parses the
//! loosely-typed key/value pairs of a display query into a [`Request`],
//! answers the request with [`respond`], and serializes the [`Response`] for
//! the client. It holds no state of its own; the triangle and palette are
//! configuration owned by the caller.

use std::str::FromStr;

use serde::Serialize;

use crate::color::ColorSpace;
use crate::error::QueryError;
use crate::palette::Palette;
use crate::triangle::{Point, Triangle};
use crate::weights::Weights;
use crate::Float;

/// The color mode of a query.
///
/// The mode selects the color space the blend is computed in. Since display
/// hardware differs in gamut, the client declares what it can show; the
/// default is the universally supported [`Srgb`](Mode::Srgb).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Srgb,
    P3,
}

impl Mode {
    /// Access the color space selected by this mode.
    pub const fn space(&self) -> ColorSpace {
        match self {
            Mode::Srgb => ColorSpace::Srgb,
            Mode::P3 => ColorSpace::DisplayP3,
        }
    }
}

impl FromStr for Mode {
    type Err = QueryError;

    /// Parse a mode, ignoring ASCII case. Anything other than `srgb` and `p3`
    /// is a client error; there is no silent fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("srgb") {
            Ok(Mode::Srgb)
        } else if s.eq_ignore_ascii_case("p3") {
            Ok(Mode::P3)
        } else {
            Err(QueryError::InvalidMode(s.to_string()))
        }
    }
}

// ====================================================================================================================

/// A parsed query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Request {
    pub point: Point,
    pub mode: Mode,
}

impl Request {
    /// Parse a request from query key/value pairs.
    ///
    /// The recognized keys are `x`, `y`, and `mode`. Coordinates that are
    /// absent or fail to parse as numbers default to 0; a `mode` that is
    /// present but unrecognized is an error, whereas an absent `mode`
    /// defaults to sRGB. Unknown keys are ignored and the last occurrence of
    /// a repeated key wins, matching common query string semantics.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut x: Float = 0.0;
        let mut y: Float = 0.0;
        let mut mode = Mode::default();

        for (key, value) in pairs {
            match key {
                "x" => x = value.trim().parse().unwrap_or(0.0),
                "y" => y = value.trim().parse().unwrap_or(0.0),
                "mode" => mode = value.trim().parse()?,
                _ => {}
            }
        }

        Ok(Self {
            point: Point::new(x, y),
            mode,
        })
    }
}

// ====================================================================================================================

/// The color part of a response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorInfo {
    /// The hashed hexadecimal form of the sRGB presentation.
    pub hex: String,

    /// The 24-bit channels of the sRGB presentation.
    pub rgb: [u8; 3],

    /// The Display P3 coordinates, present only for P3 mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p3: Option<[Float; 3]>,
}

/// The answer to a query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Response {
    /// The queried point, echoed back.
    pub coordinates: Point,

    /// The mode the blend was computed in.
    pub mode: Mode,

    /// The clamped barycentric weights of the point.
    pub weights: Weights,

    /// The blended color.
    pub color: ColorInfo,

    /// Whether the exact blend fell outside the gamut of the mode's color
    /// space, or outside the sRGB gamut of the `hex` and `rgb` presentation.
    pub out_of_gamut: bool,
}

/// Answer the request against the given triangle and palette.
///
/// This function converts the queried point to barycentric weights, clamping
/// points outside the triangle to the nearest boundary weights, and blends
/// the palette in the color space selected by the request's mode. The
/// response always carries an sRGB presentation as `hex` and `rgb`; in P3
/// mode it additionally carries the Display P3 coordinates, and blends that
/// exceed the sRGB gamut are clipped for presentation and flagged.
pub fn respond(
    triangle: &Triangle,
    palette: &Palette,
    request: &Request,
) -> Result<Response, QueryError> {
    let weights = triangle.clamped_weights(request.point);
    log::debug!(
        "point ({}, {}) maps to weights {:?}",
        request.point.x,
        request.point.y,
        weights
    );

    let space = request.mode.space();
    let blend = palette.blend(weights, space)?;

    // The hex and rgb fields always present in sRGB, whatever the mode.
    let srgb = blend.color.to(ColorSpace::Srgb);
    let presentable = srgb.in_gamut();
    let srgb = if presentable { srgb } else { srgb.clip() };

    Ok(Response {
        coordinates: request.point,
        mode: request.mode,
        weights,
        color: ColorInfo {
            hex: srgb.to_hex(),
            rgb: srgb.to_24bit(),
            p3: match request.mode {
                Mode::Srgb => None,
                Mode::P3 => Some(*blend.color.as_ref()),
            },
        },
        out_of_gamut: blend.out_of_gamut || !presentable,
    })
}

// ====================================================================================================================
