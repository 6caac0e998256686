use serde::Serialize;

use crate::error::WeightsError;
use crate::triangle::Quality;
use crate::Float;

/// The tolerance for the sum-to-one invariant.
///
/// A weight triple is treated as normalized if its sum strays from 1 by no
/// more than this much. The tolerance is deliberately loose so that weights
/// that survived serialization with reduced precision still validate.
pub const SUM_TOLERANCE: Float = 1e-3;

/// A barycentric weight triple.
///
/// Each component expresses the pull of one [`Quality`] on a point inside the
/// trade-off triangle. The components of a *valid* triple are non-negative
/// and sum to 1 within [`SUM_TOLERANCE`]; such a triple describes a point
/// inside the closed triangle. This type does not enforce that invariant on
/// construction, because the forward mapping of an *outside* point correctly
/// produces a triple with at least one negative component. Consumers that
/// require a convex combination call [`validate`](Weights::validate).
///
/// Weights serialize as an object with `privacy`, `performance`, and
/// `personalization` fields, matching the query interface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Weights {
    pub privacy: Float,
    pub performance: Float,
    pub personalization: Float,
}

impl Weights {
    /// The balanced triple, i.e., the weights of the centroid.
    pub const BALANCED: Weights = Weights::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);

    /// Create a new weight triple.
    #[inline]
    pub const fn new(privacy: Float, performance: Float, personalization: Float) -> Self {
        Self {
            privacy,
            performance,
            personalization,
        }
    }

    /// Create the unit triple for the given quality, i.e., the weights of
    /// that quality's vertex.
    pub const fn unit(quality: Quality) -> Self {
        match quality {
            Quality::Privacy => Self::new(1.0, 0.0, 0.0),
            Quality::Performance => Self::new(0.0, 1.0, 0.0),
            Quality::Personalization => Self::new(0.0, 0.0, 1.0),
        }
    }

    /// Access the weight for the given quality.
    #[inline]
    pub const fn get(&self, quality: Quality) -> Float {
        match quality {
            Quality::Privacy => self.privacy,
            Quality::Performance => self.performance,
            Quality::Personalization => self.personalization,
        }
    }

    /// Access the weights as an array ordered by [`Quality`].
    #[inline]
    pub const fn to_array(&self) -> [Float; 3] {
        [self.privacy, self.performance, self.personalization]
    }

    /// Determine the sum of the three components.
    #[inline]
    pub fn sum(&self) -> Float {
        self.privacy + self.performance + self.personalization
    }

    /// Validate this triple as a convex combination.
    ///
    /// This method checks that every component is a finite, non-negative
    /// number and that the components sum to 1 within [`SUM_TOLERANCE`]. It
    /// rejects invalid triples instead of repairing them; use
    /// [`clamped`](Weights::clamped) for explicit repair.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for quality in Quality::ALL {
            let value = self.get(quality);
            if !value.is_finite() {
                return Err(WeightsError::NotFinite(quality));
            }
            if value < 0.0 {
                return Err(WeightsError::Negative(quality, value));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightsError::NotNormalized(sum));
        }

        Ok(())
    }

    /// Determine whether this triple is a convex combination.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Clamp each component to unit range and renormalize to sum 1.
    ///
    /// For the weights of a point inside the closed triangle, this is the
    /// identity up to floating point error. For an outside point, the result
    /// is the valid triple of a nearby boundary point. At least one clamped
    /// component is always positive, since the affine components sum to 1, so
    /// the renormalization is well-defined.
    #[must_use = "method returns a new weight triple and does not mutate the original"]
    pub fn clamped(&self) -> Self {
        let privacy = self.privacy.clamp(0.0, 1.0);
        let performance = self.performance.clamp(0.0, 1.0);
        let personalization = self.personalization.clamp(0.0, 1.0);
        let sum = privacy + performance + personalization;

        Self::new(privacy / sum, performance / sum, personalization / sum)
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Weights, SUM_TOLERANCE};
    use crate::error::WeightsError;
    use crate::triangle::Quality;
    use crate::Float;

    #[test]
    fn test_validate() {
        assert!(Weights::BALANCED.is_valid());
        assert!(Weights::new(0.2, 0.3, 0.5).is_valid());
        assert!(Weights::unit(Quality::Privacy).is_valid());

        // Sum 1.5 must be rejected, not renormalized.
        assert_eq!(
            Weights::new(0.5, 0.5, 0.5).validate(),
            Err(WeightsError::NotNormalized(1.5))
        );
        assert_eq!(
            Weights::new(-0.2, 0.7, 0.5).validate(),
            Err(WeightsError::Negative(Quality::Privacy, -0.2))
        );
        assert_eq!(
            Weights::new(0.5, Float::NAN, 0.5).validate(),
            Err(WeightsError::NotFinite(Quality::Performance))
        );

        // Tolerance admits serialization jitter but nothing more.
        assert!(Weights::new(0.3335, 0.3335, 0.333).is_valid());
        assert!(!Weights::new(0.34, 0.34, 0.34).is_valid());
    }

    #[test]
    fn test_clamped() {
        let outside = Weights::new(1.25, -0.5, 0.25);
        let clamped = outside.clamped();
        assert!(clamped.is_valid(), "clamping must repair outside weights");
        assert!((clamped.sum() - 1.0).abs() <= SUM_TOLERANCE, "sum must be 1");
        assert_eq!(clamped.performance, 0.0, "negative component clamps to 0");

        let inside = Weights::new(0.25, 0.25, 0.5);
        assert_eq!(inside.clamped(), inside, "inside weights pass through");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Weights::new(0.5, 0.25, 0.25))
            .expect("weights serialize to JSON");
        assert_eq!(
            json,
            r#"{"privacy":0.5,"performance":0.25,"personalization":0.25}"#
        );
    }
}
