use serde::Serialize;

use crate::error::DegenerateTriangleError;
use crate::weights::Weights;
use crate::Float;

/// A point in the display coordinate frame.
///
/// The frame is the canvas frame of the surrounding UI: x grows rightward and
/// y grows downward. The type imposes no bounds; whether a point lies inside
/// a triangle is a property of the mapping functions, not of the point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: Float,
    pub y: Float,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }
}

// ====================================================================================================================

/// The three qualities spanning the trade-off triangle.
///
/// Each quality owns one triangle vertex and one reference color. The
/// discriminants double as indices into vertex and palette arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quality {
    Privacy,
    Performance,
    Personalization,
}

impl Quality {
    /// All three qualities in vertex order.
    pub const ALL: [Quality; 3] = [
        Quality::Privacy,
        Quality::Performance,
        Quality::Personalization,
    ];
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Quality::Privacy => "privacy",
            Quality::Performance => "performance",
            Quality::Personalization => "personalization",
        };

        f.write_str(s)
    }
}

// ====================================================================================================================

/// The relative threshold below which twice the signed area counts as zero.
const DEGENERACY_THRESHOLD: Float = 1e-12;

/// The trade-off triangle.
///
/// A triangle binds each [`Quality`] to a fixed vertex position and converts
/// between points and barycentric [`Weights`] in both directions. The
/// geometry is configuration: it is validated once at construction, never per
/// request, and a constructed triangle is immutable.
///
/// # Mapping Contract
///
/// [`weights`](Triangle::weights) solves the barycentric linear system
/// exactly via signed-area ratios, so the components always sum to 1. For a
/// point inside the closed triangle all components are non-negative; for an
/// outside point at least one component is negative, which is a defined
/// result rather than an error. [`point`](Triangle::point) computes the
/// matching affine combination `w1*V1 + w2*V2 + w3*V3` for *any* triple,
/// normalized or not. The two functions invert each other within 1e-9 for
/// interior points.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    vertices: [Point; 3],
    // Twice the signed area, the denominator of the barycentric solve.
    denominator: Float,
}

impl Triangle {
    /// Create a new triangle with the given vertices, in [`Quality`] order.
    ///
    /// This constructor fails fast with [`DegenerateTriangleError`] if the
    /// vertices are collinear or coincident, i.e., if twice the signed area
    /// vanishes relative to the squared extent of the vertices.
    // Plain multiplies and adds, not mul_add: the weights solve divides by
    // this denominator, and only the plain form makes numerator and
    // denominator syntactically identical at the vertices, which is what
    // guarantees exact unit weights there.
    #[allow(clippy::suboptimal_flops)]
    pub fn new(vertices: [Point; 3]) -> Result<Self, DegenerateTriangleError> {
        let [v1, v2, v3] = vertices;
        let denominator = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);

        let extent = vertices
            .iter()
            .flat_map(|v| [v.x.abs(), v.y.abs()])
            .fold(0.0 as Float, Float::max);
        if !denominator.is_finite() || denominator.abs() <= DEGENERACY_THRESHOLD * extent * extent {
            return Err(DegenerateTriangleError { vertices });
        }

        Ok(Self {
            vertices,
            denominator,
        })
    }

    /// Create the equilateral triangle used by the visualization.
    ///
    /// The layout matches the canvas rendering of the original page: the
    /// Privacy vertex sits `size` above the center, with Performance at the
    /// bottom left and Personalization at the bottom right. Since y grows
    /// downward in the display frame, "above" means smaller y. A zero or
    /// non-finite size fails with [`DegenerateTriangleError`].
    pub fn equilateral(center: Point, size: Float) -> Result<Self, DegenerateTriangleError> {
        let half_width = size * (3.0 as Float).sqrt() / 2.0;
        Self::new([
            Point::new(center.x, center.y - size),
            Point::new(center.x - half_width, center.y + size / 2.0),
            Point::new(center.x + half_width, center.y + size / 2.0),
        ])
    }

    /// Access the vertex owned by the given quality.
    #[inline]
    pub const fn vertex(&self, quality: Quality) -> Point {
        self.vertices[quality as usize]
    }

    /// Access all three vertices in [`Quality`] order.
    #[inline]
    pub const fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    /// Determine the centroid, whose weights are balanced thirds.
    pub fn centroid(&self) -> Point {
        let [v1, v2, v3] = self.vertices;
        Point::new((v1.x + v2.x + v3.x) / 3.0, (v1.y + v2.y + v3.y) / 3.0)
    }

    /// Convert the point to barycentric weights.
    ///
    /// This method returns the exact algebraic solution of
    /// `point = w1*V1 + w2*V2 + w3*V3` with `w1 + w2 + w3 = 1`. A point on an
    /// edge has a zero weight for the opposite quality; a point at a vertex
    /// has the unit triple for that quality; a point outside the triangle has
    /// at least one negative weight.
    // Plain arithmetic for the same reason as in the constructor.
    #[allow(clippy::suboptimal_flops)]
    pub fn weights(&self, point: Point) -> Weights {
        let [v1, v2, v3] = self.vertices;

        let w1 = ((v2.y - v3.y) * (point.x - v3.x) + (v3.x - v2.x) * (point.y - v3.y))
            / self.denominator;
        let w2 = ((v3.y - v1.y) * (point.x - v3.x) + (v1.x - v3.x) * (point.y - v3.y))
            / self.denominator;
        let w3 = 1.0 - w1 - w2;

        Weights::new(w1, w2, w3)
    }

    /// Convert the point to clamped, renormalized barycentric weights.
    ///
    /// For inside points, the result equals [`weights`](Triangle::weights).
    /// For outside points, components are clamped to unit range and
    /// renormalized to sum 1, so a pointer dragged past an edge saturates
    /// instead of failing. The result always validates.
    pub fn clamped_weights(&self, point: Point) -> Weights {
        self.weights(point).clamped()
    }

    /// Convert barycentric weights to a point.
    ///
    /// This method computes `w1*V1 + w2*V2 + w3*V3` directly. It is defined
    /// for any weight triple, including triples that do not sum to 1;
    /// normalizing first is the caller's responsibility where that invariant
    /// matters.
    pub fn point(&self, weights: Weights) -> Point {
        let [v1, v2, v3] = self.vertices;
        let Weights {
            privacy: w1,
            performance: w2,
            personalization: w3,
        } = weights;

        Point::new(
            w1.mul_add(v1.x, w2.mul_add(v2.x, w3 * v3.x)),
            w1.mul_add(v1.y, w2.mul_add(v2.y, w3 * v3.y)),
        )
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Point, Quality, Triangle};
    use crate::error::DegenerateTriangleError;
    use crate::weights::Weights;
    use crate::Float;

    // A triangle whose coordinates are exactly representable in binary, so
    // vertex and edge cases hold without tolerance.
    fn dyadic_triangle() -> Triangle {
        Triangle::new([
            Point::new(2.0, -4.0),
            Point::new(-2.0, 2.0),
            Point::new(6.0, 2.0),
        ])
        .expect("vertices span an area")
    }

    fn canvas_triangle() -> Triangle {
        Triangle::equilateral(Point::new(512.0, 384.0), 300.0).expect("size is positive")
    }

    #[test]
    fn test_degenerate_construction() {
        let collinear = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        assert_eq!(
            Triangle::new(collinear).expect_err("collinear vertices"),
            DegenerateTriangleError {
                vertices: collinear
            }
        );

        let coincident = [Point::new(3.0, 4.0); 3];
        assert!(Triangle::new(coincident).is_err(), "coincident vertices");
        assert!(
            Triangle::equilateral(Point::new(0.0, 0.0), 0.0).is_err(),
            "zero size"
        );
    }

    #[test]
    fn test_vertex_weights_are_exact() {
        for triangle in [dyadic_triangle(), canvas_triangle()] {
            for quality in Quality::ALL {
                assert_eq!(
                    triangle.weights(triangle.vertex(quality)),
                    Weights::unit(quality),
                    "vertex of {} must map to its unit triple",
                    quality
                );
            }
        }
    }

    #[test]
    fn test_edge_weight_is_exactly_zero() {
        let triangle = dyadic_triangle();
        // Midpoint of the edge opposite the Privacy vertex; all quantities
        // are dyadic, so the solve is exact.
        let midpoint = Point::new(2.0, 2.0);
        let weights = triangle.weights(midpoint);
        assert_eq!(weights.privacy, 0.0, "opposite weight vanishes on edge");
        assert_eq!(weights.performance, 0.5, "edge midpoint splits evenly");
        assert_eq!(weights.personalization, 0.5, "edge midpoint splits evenly");
    }

    #[test]
    fn test_centroid_weights() {
        for triangle in [dyadic_triangle(), canvas_triangle()] {
            let weights = triangle.weights(triangle.centroid());
            for quality in Quality::ALL {
                assert!(
                    (weights.get(quality) - 1.0 / 3.0).abs() <= 1e-9,
                    "centroid weight for {} should be 1/3, is {}",
                    quality,
                    weights.get(quality)
                );
            }
        }
    }

    #[test]
    fn test_outside_point_goes_negative() {
        let triangle = canvas_triangle();
        // Above the Privacy vertex, which sits at y = 84.
        let outside = Point::new(512.0, 0.0);
        let weights = triangle.weights(outside);
        assert!(
            weights.to_array().iter().any(|w| *w < 0.0),
            "outside point must produce a negative weight, got {:?}",
            weights
        );
        assert!(
            (weights.sum() - 1.0).abs() <= 1e-9,
            "affine weights still sum to 1"
        );

        let clamped = triangle.clamped_weights(outside);
        assert!(clamped.is_valid(), "clamped weights must validate");
    }

    #[test]
    fn test_round_trip_interior_points() {
        use rand::Rng;
        let mut rng = rand::rng();

        let triangle = canvas_triangle();
        let scale = 300.0;

        for _ in 0..10_000 {
            // Sample the simplex while keeping every weight at least 1e-3
            // away from the boundary, so the points are strictly interior.
            let u: Float = rng.random_range(0.001..0.997);
            let v: Float = rng.random_range(0.001..(0.998 - u));
            let expected = Weights::new(u, v, 1.0 - u - v);

            let point = triangle.point(expected);
            let weights = triangle.weights(point);

            for quality in Quality::ALL {
                let w = weights.get(quality);
                assert!(
                    0.0 < w && w < 1.0,
                    "interior weight out of open range: {:?}",
                    weights
                );
                assert!(
                    (w - expected.get(quality)).abs() <= 1e-9,
                    "weight round trip diverged: {:?} vs {:?}",
                    weights,
                    expected
                );
            }
            assert!(
                (weights.sum() - 1.0).abs() <= 1e-9,
                "weights must sum to 1: {:?}",
                weights
            );

            let back = triangle.point(weights);
            assert!(
                (back.x - point.x).abs() <= 1e-9 * scale
                    && (back.y - point.y).abs() <= 1e-9 * scale,
                "point round trip diverged: {:?} vs {:?}",
                back,
                point
            );
        }
    }
}
