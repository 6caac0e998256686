//! # Trilemma
//!
//! 🔺 Trilemma maps positions inside a triangle onto the trade-off between
//! privacy, performance, and personalization, and renders that trade-off as
//! color. It comprises three parts:
//!
//!   * The **triangle mapper** converts between display points and
//!     barycentric [`Weights`] through a [`Triangle`], exactly and in both
//!     directions.
//!   * The **color mapper** blends a [`Palette`] of reference colors
//!     according to the weights, converting between sRGB and Display P3 with
//!     the real primaries matrices and flagging blends that exceed the
//!     target gamut. [`Color`] also parses and formats hashed hexadecimal
//!     and CSS `color()` notation.
//!   * The **query layer** in [`query`] parses loosely-typed key/value
//!     queries, runs both mappers, and produces a serializable response.
//!
//! All computation is pure: the triangle and palette are immutable
//! configuration, errors are plain values, and nothing here panics on bad
//! input.
//!
//!
//! ## One-Two-Three: Using Trilemma's Types
//!
//! ```
//! # use trilemma::{Palette, Point, Triangle, ColorSpace};
//! # use trilemma::error::DegenerateTriangleError;
//! let triangle = Triangle::equilateral(Point::new(512.0, 384.0), 300.0)?;
//! let weights = triangle.clamped_weights(Point::new(512.0, 384.0));
//! let blend = Palette::DEFAULT
//!     .blend(weights, ColorSpace::Srgb)
//!     .expect("clamped weights are valid");
//! assert_eq!(blend.color.to_hex(), "#555555");
//! # Ok::<(), DegenerateTriangleError>(())
//! ```
//!
//!
//! ## Feature Flags
//!
//! This crate has one feature flag, `f64`, which is enabled by default. If
//! present, the [`Float`] and [`Bits`] aliases are `f64` and `u64`.
//! Otherwise, they are `f32` and `u32`.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod color;
mod core;
pub mod error;
mod palette;
pub mod query;
mod triangle;
mod weights;

pub use color::{Color, ColorSpace};
pub use palette::{Blend, Palette};
pub use triangle::{Point, Quality, Triangle};
pub use weights::{Weights, SUM_TOLERANCE};

#[doc(hidden)]
pub use core::to_eq_bits;
