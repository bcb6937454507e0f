//! Straight-element geometry
//!
//! Free functions on corner pairs, used when building a [`Mesh`](crate::core::types::Mesh),
//! and the per-element queries the integrands need.

use crate::core::types::Element;

/// Length of the segment from `a` to `b`
#[inline]
pub fn segment_length(a: [f64; 2], b: [f64; 2]) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

/// Midpoint of the segment from `a` to `b`
#[inline]
pub fn segment_midpoint(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])]
}

/// Unit normal of the segment from `a` to `b`
///
/// The tangent `(b − a)/|b − a|` rotated clockwise by 90°, so a
/// counter-clockwise polygon gets outward normals.
///
/// # Example
/// ```
/// use math_audio_bem2d::core::mesh::segment_normal;
/// assert_eq!(segment_normal([0.0, 0.0], [2.0, 0.0]), [0.0, -1.0]);
/// ```
#[inline]
pub fn segment_normal(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    let length = segment_length(a, b);
    let tx = (b[0] - a[0]) / length;
    let ty = (b[1] - a[1]) / length;
    [ty, -tx]
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p: [f64; 2], q: [f64; 2]) -> f64 {
    (q[0] - p[0]).hypot(q[1] - p[1])
}

/// Dot product
#[inline]
pub fn dot(u: [f64; 2], v: [f64; 2]) -> f64 {
    u[0] * v[0] + u[1] * v[1]
}

impl Element {
    /// Unit tangent from the first to the second corner
    pub fn tangent(&self) -> [f64; 2] {
        let [a, b] = self.corners;
        [(b[0] - a[0]) / self.length, (b[1] - a[1]) / self.length]
    }

    /// Distance from `point` to the element midpoint
    pub fn center_distance(&self, point: [f64; 2]) -> f64 {
        distance(self.center, point)
    }

    /// True if `point` is within `factor` element lengths of the midpoint
    pub fn is_near(&self, point: [f64; 2], factor: f64) -> bool {
        self.center_distance(point) < factor * self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Mesh;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_geometry() {
        let (a, b) = ([1.0, 1.0], [4.0, 5.0]);
        assert_relative_eq!(segment_length(a, b), 5.0);
        assert_eq!(segment_midpoint(a, b), [2.5, 3.0]);

        let n = segment_normal(a, b);
        assert_relative_eq!(n[0], 0.8);
        assert_relative_eq!(n[1], -0.6);
        assert_relative_eq!(dot(n, [b[0] - a[0], b[1] - a[1]]), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_element_queries() {
        let mesh = Mesh::from_points(&[[0.0, 0.0], [0.0, 2.0]], &[[0, 1]], None).unwrap();
        let element = mesh.element(0);

        assert_eq!(element.tangent(), [0.0, 1.0]);
        assert_eq!(element.normal, [1.0, 0.0]);
        assert_relative_eq!(element.center_distance([3.0, 5.0]), 5.0);
        assert!(element.is_near([1.0, 1.0], 2.0));
        assert!(!element.is_near([5.0, 1.0], 2.0));
    }
}
