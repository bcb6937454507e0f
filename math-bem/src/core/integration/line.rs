//! Complex line integrals over straight elements
//!
//! The segment from `a` to `b` is parametrised symmetrically about its
//! midpoint, `x(s) = m + s·(b − a)/2` with s ∈ [−1, 1], so the collocation
//! point of a self element sits at s = 0. The result equals
//! `|b − a| · ∫₀¹ f(a + t(b − a)) dt`.

use super::QuadratureParams;
use super::adaptive::complex_adaptive_integrate;
use super::gauss::gauss_legendre;
use num_complex::Complex64;

/// How an element integral is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineQuadrature {
    /// Fixed Gauss-Legendre rule
    Regular,
    /// Adaptive rule without breakpoint, for elements close to the observation point
    NearSingular,
    /// Adaptive rule with a breakpoint at the element midpoint
    Singular,
}

impl LineQuadrature {
    /// `Singular` when `singular` is set, `Regular` otherwise
    pub fn from_flag(singular: bool) -> Self {
        if singular {
            Self::Singular
        } else {
            Self::Regular
        }
    }
}

/// Point at parameter `t ∈ [0, 1]` on the segment from `a` to `b`
#[inline]
pub fn point_on_segment(a: [f64; 2], b: [f64; 2], t: f64) -> [f64; 2] {
    [a[0] + t * (b[0] - a[0]), a[1] + t * (b[1] - a[1])]
}

/// Integrate `f` along the segment from `a` to `b` with default parameters
///
/// `singular` selects the adaptive rule with a breakpoint at the midpoint.
///
/// # Example
/// ```
/// use math_audio_bem2d::core::integration::line_integral;
/// use num_complex::Complex64;
///
/// let value = line_integral(|p| Complex64::new(p[0] * p[0] + p[1] * p[1], 0.0), [0.0, 0.0], [3.0, 4.0], false);
/// assert!((value.re - 125.0 / 3.0).abs() < 1e-10);
/// ```
pub fn line_integral<F>(f: F, a: [f64; 2], b: [f64; 2], singular: bool) -> Complex64
where
    F: Fn([f64; 2]) -> Complex64,
{
    line_integral_with_params(
        f,
        a,
        b,
        LineQuadrature::from_flag(singular),
        &QuadratureParams::default(),
    )
}

/// Integrate `f` along the segment from `a` to `b`
///
/// Non-convergence of the adaptive rule is logged and the estimate returned.
pub fn line_integral_with_params<F>(
    f: F,
    a: [f64; 2],
    b: [f64; 2],
    mode: LineQuadrature,
    params: &QuadratureParams,
) -> Complex64
where
    F: Fn([f64; 2]) -> Complex64,
{
    let mid = [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])];
    let half = [0.5 * (b[0] - a[0]), 0.5 * (b[1] - a[1])];
    let jacobian = half[0].hypot(half[1]);
    let at = |s: f64| [mid[0] + s * half[0], mid[1] + s * half[1]];

    match mode {
        LineQuadrature::Regular => {
            let (x, w) = gauss_legendre(params.gauss_order);
            let sum: Complex64 = x.iter().zip(&w).map(|(&s, &wi)| f(at(s)) * wi).sum();
            sum * jacobian
        }
        LineQuadrature::NearSingular | LineQuadrature::Singular => {
            let breakpoints: &[f64] = if mode == LineQuadrature::Singular {
                &[0.0]
            } else {
                &[]
            };
            let result = complex_adaptive_integrate(
                |s| f(at(s)),
                -1.0,
                1.0,
                breakpoints,
                params.epsabs,
                params.epsrel,
                params.max_depth,
            );
            if !result.converged {
                log::warn!(
                    "{:?} element integral from {:?} to {:?} did not converge (error estimate {:.3e})",
                    mode,
                    a,
                    b,
                    result.abs_error * jacobian
                );
            }
            result.value * jacobian
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn radius_squared(p: [f64; 2]) -> Complex64 {
        Complex64::new(p[0] * p[0] + p[1] * p[1], 0.0)
    }

    #[test]
    fn test_regular_polynomial() {
        let value = line_integral(radius_squared, [0.0, 0.0], [3.0, 4.0], false);
        assert_abs_diff_eq!(value.re, 125.0 / 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(value.im, 0.0);
    }

    #[test]
    fn test_all_modes_agree_on_smooth_integrand() {
        let params = QuadratureParams::default();
        let f = |p: [f64; 2]| Complex64::new(p[0].cos(), p[1].sin());
        let (a, b) = ([0.2, -0.4], [1.1, 0.9]);

        let regular = line_integral_with_params(f, a, b, LineQuadrature::Regular, &params);
        let near = line_integral_with_params(f, a, b, LineQuadrature::NearSingular, &params);
        let singular = line_integral_with_params(f, a, b, LineQuadrature::Singular, &params);

        assert!((regular - near).norm() < 1e-8);
        assert!((singular - near).norm() < 1e-10);
    }

    #[test]
    fn test_singular_principal_value() {
        let value = line_integral(
            |p| Complex64::new(1.0 / p[0], 0.0),
            [-1.0, 0.0],
            [1.0, 0.0],
            true,
        );
        assert_abs_diff_eq!(value.re, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_log_kernel() {
        // ∫ ln|x − m| over an element of length 2 centred on m: 2(ln 1 − 1) = −2
        let a = [0.5, 1.0];
        let b = [0.5 + 2.0 / 5.0_f64.sqrt(), 1.0 + 4.0 / 5.0_f64.sqrt()];
        let m = point_on_segment(a, b, 0.5);
        let value = line_integral(
            |p| Complex64::new(0.0, (p[0] - m[0]).hypot(p[1] - m[1]).ln()),
            a,
            b,
            true,
        );
        assert_abs_diff_eq!(value.im, -2.0, epsilon = 1e-7);
    }

    #[test]
    fn test_point_on_segment() {
        assert_eq!(point_on_segment([1.0, 2.0], [3.0, 6.0], 0.5), [2.0, 4.0]);
        assert_eq!(point_on_segment([1.0, 2.0], [3.0, 6.0], 0.0), [1.0, 2.0]);
    }
}
