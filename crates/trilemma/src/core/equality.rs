use crate::{Bits, Float};

/// The factor that drops the least significant digit when rounding.
#[cfg(feature = "f64")]
pub(crate) const ROUNDING_FACTOR: Float = 1e14;
/// The factor that drops the least significant digit when rounding.
#[cfg(not(feature = "f64"))]
pub(crate) const ROUNDING_FACTOR: Float = 1e5;

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`to_eq_bits`] to normalize the two floating point
/// numbers by zeroing out not-a-numbers, reducing resolution, and dropping the
/// sign of negative zeros and then compares the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical. Its
/// message places the numbers below each other at the beginning of subsequent
/// lines for easy comparability.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that two coordinate slices describe the same
/// color.
///
/// Given two coordinate arrays, this macro normalizes the coordinates by
/// zeroing out not-a-numbers, reducing resolution, and dropping the sign of
/// negative zeros before comparing the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical. Its
/// message places the coordinates below each other at the beginning of
/// subsequent lines for easy comparability.
#[cfg(test)]
macro_rules! assert_same_coordinates {
    ($cs1:expr , $cs2:expr $(,)?) => {
        let (cs1, cs2) = ($cs1, $cs2);
        let bits1 = $crate::core::to_eq_coordinates(cs1);
        let bits2 = $crate::core::to_eq_coordinates(cs2);
        assert_eq!(
            bits1, bits2,
            "color coordinates differ:\n{:?}\n{:?}",
            cs1, cs2
        );
    };
}

#[cfg(test)]
pub(crate) use assert_same_coordinates;

// --------------------------------------------------------------------------------------------------------------------

/// Normalize the color coordinates.
///
/// This function ensures that coordinates are well-formed. In particular, it
/// replaces not-a-number coordinates with zero.
#[inline]
pub(crate) fn normalize(coordinates: &[Float; 3]) -> [Float; 3] {
    let [mut c1, mut c2, mut c3] = *coordinates;

    if c1.is_nan() {
        c1 = 0.0;
    }
    if c2.is_nan() {
        c2 = 0.0;
    }
    if c3.is_nan() {
        c3 = 0.0;
    }

    [c1, c2, c3]
}

/// Normalize coordinates for equality testing and hashing.
#[must_use = "function returns new color coordinates and does not mutate original value"]
pub(crate) fn to_eq_coordinates(coordinates: &[Float; 3]) -> [Bits; 3] {
    // Zero out not-a-numbers.
    let [mut c1, mut c2, mut c3] = normalize(coordinates);

    // Reduce precision.
    c1 = (c1 * ROUNDING_FACTOR).round();
    c2 = (c2 * ROUNDING_FACTOR).round();
    c3 = (c3 * ROUNDING_FACTOR).round();

    // Prevent too much negativity.
    if c1 == -0.0 {
        c1 = 0.0;
    }
    if c2 == -0.0 {
        c2 = 0.0;
    }
    if c3 == -0.0 {
        c3 = 0.0;
    }

    [c1.to_bits(), c2.to_bits(), c3.to_bits()]
}

// --------------------------------------------------------------------------------------------------------------------

/// Helper function to normalize a floating point number before hashing or
/// equality testing.
///
/// This function zeros out not-a-number, reduces significant digits after the
/// decimal, and drops the sign of negative zero and returns the result as a
/// bit string. It is only public because the [`assert_close_enough`] test
/// macro uses it.
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    // Eliminate not-a-number.
    let mut f = if f.is_nan() { 0.0 } else { f };

    // Reduce precision.
    f = (ROUNDING_FACTOR * f).round();

    // Too much negativity!
    if f == -0.0 {
        f = 0.0;
    }

    f.to_bits()
}

#[cfg(test)]
mod test {
    use super::{to_eq_bits, to_eq_coordinates};
    use crate::Float;

    #[test]
    fn test_to_eq_bits() {
        assert_eq!(to_eq_bits(Float::NAN), to_eq_bits(0.0));
        assert_eq!(to_eq_bits(-0.0), to_eq_bits(0.0));
        assert_eq!(to_eq_bits(0.1 + 0.2), to_eq_bits(0.3));
        assert_ne!(to_eq_bits(0.3), to_eq_bits(0.30001));
    }

    #[test]
    fn test_to_eq_coordinates() {
        assert_eq!(
            to_eq_coordinates(&[Float::NAN, -0.0, 1.0]),
            to_eq_coordinates(&[0.0, 0.0, 1.0])
        );
    }
}
