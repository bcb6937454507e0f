//! 2D Helmholtz Green's function and its gradient
//!
//! With the `exp(+iωt)` time convention the outgoing free-space solution of
//! `Δp + k²p = δ` is
//! ```text
//! G(x, y) = (i/4) H₀⁽²⁾(k|x−y|)
//! ```

use super::bessel::hankel2;
use crate::Point;
use num_complex::Complex64;
use std::f64::consts::PI;

/// 2D Helmholtz Green's function G = (i/4) H₀⁽²⁾(kr)
///
/// # Arguments
/// * `r` - Distance |x - y|
/// * `k` - Wave number
///
/// # Example
/// ```
/// use math_audio_wave2d::special::helmholtz::greens_function_2d;
/// use math_audio_wave2d::special::hankel2;
/// use num_complex::Complex64;
///
/// let g = greens_function_2d(1.0, 2.0);
/// assert!((g - Complex64::new(0.0, 0.25) * hankel2(0, 2.0)).norm() < 1e-15);
/// ```
#[inline]
pub fn greens_function_2d(r: f64, k: f64) -> Complex64 {
    if r < 1e-15 {
        return Complex64::new(f64::INFINITY, 0.0);
    }
    Complex64::new(0.0, 0.25) * hankel2(0, k * r)
}

/// Gradient of the 2D Green's function with respect to the field point
///
/// ```text
/// ∇_x G = −(ik/4) H₁⁽²⁾(kr) (x − y)/r
/// ```
pub fn greens_function_gradient_2d(source: &Point, field: &Point, k: f64) -> [Complex64; 2] {
    let rx = field.x - source.x;
    let ry = field.y - source.y;
    let r = (rx * rx + ry * ry).sqrt();

    if r < 1e-15 {
        let inf = Complex64::new(f64::INFINITY, 0.0);
        return [inf, inf];
    }

    let factor = Complex64::new(0.0, -0.25 * k) * hankel2(1, k * r) / r;
    [factor * rx, factor * ry]
}

/// Distance between two points
#[inline]
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    p1.distance_to(p2)
}

/// 2D Laplace Green's function: G = -ln(r)/(2π)
#[inline]
pub fn laplace_greens_function_2d(r: f64) -> f64 {
    if r < 1e-15 {
        f64::INFINITY
    } else {
        -r.ln() / (2.0 * PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_greens_function_reference() {
        // g(2, (0,0), (3,4)) = i H₀⁽²⁾(10) / 4
        let g = greens_function_2d(5.0, 2.0);
        let expected = Complex64::new(0.0, 0.25) * hankel2(0, 10.0);
        assert!((g - expected).norm() < EPSILON);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let source = Point::new(0.2, -0.1);
        let field = Point::new(1.3, 0.7);
        let k = 2.5;
        let h = 1e-6;

        let grad = greens_function_gradient_2d(&source, &field, k);

        let gx = (greens_function_2d(distance(&source, &Point::new(field.x + h, field.y)), k)
            - greens_function_2d(distance(&source, &Point::new(field.x - h, field.y)), k))
            / (2.0 * h);
        let gy = (greens_function_2d(distance(&source, &Point::new(field.x, field.y + h)), k)
            - greens_function_2d(distance(&source, &Point::new(field.x, field.y - h)), k))
            / (2.0 * h);

        assert!((grad[0] - gx).norm() < 1e-7);
        assert!((grad[1] - gy).norm() < 1e-7);
    }

    #[test]
    fn test_low_frequency_limit() {
        // Re G = Y₀(kr)/4 ≈ ln(r)/(2π) + const for kr → 0
        let k = 1e-4;
        let g1 = greens_function_2d(1.0, k);
        let g2 = greens_function_2d(2.0, k);
        let diff = g1.re - g2.re;
        let laplace_diff = laplace_greens_function_2d(1.0) - laplace_greens_function_2d(2.0);
        assert!((diff + laplace_diff).abs() < 1e-6);
    }
}
