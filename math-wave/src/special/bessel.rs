//! Cylindrical Bessel and Hankel functions of integer order
//!
//! Thin wrappers over [`spec_math::Bessel`] that add negative orders via the
//! reflection formulas and the outgoing Hankel function for the `exp(+iωt)`
//! convention:
//!
//! ```text
//! J₋ₙ(x) = (−1)ⁿ Jₙ(x)        Y₋ₙ(x) = (−1)ⁿ Yₙ(x)
//! Hₙ⁽²⁾(x) = Jₙ(x) − i·Yₙ(x)
//! ```

use num_complex::Complex64;
use spec_math::Bessel;
use std::f64::consts::PI;

/// Euler–Mascheroni constant γ
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Below this argument `Y₁(z) + 2/(πz)` is summed from its power series
const Y1_SERIES_THRESHOLD: f64 = 0.5;

#[inline]
fn reflection_sign(order: i32) -> f64 {
    if order < 0 && order % 2 != 0 { -1.0 } else { 1.0 }
}

/// Bessel function of the first kind Jₙ(x)
///
/// # Example
/// ```
/// use math_audio_wave2d::special::bessel_j;
/// assert!((bessel_j(0, 1.0) - 0.7651976865579666).abs() < 1e-10);
/// assert!((bessel_j(-1, 1.0) + bessel_j(1, 1.0)).abs() < 1e-15);
/// ```
#[inline]
pub fn bessel_j(order: i32, x: f64) -> f64 {
    reflection_sign(order) * x.bessel_jv(order.unsigned_abs() as f64)
}

/// Bessel function of the second kind (Neumann) Yₙ(x), x > 0
#[inline]
pub fn bessel_y(order: i32, x: f64) -> f64 {
    reflection_sign(order) * x.bessel_yv(order.unsigned_abs() as f64)
}

/// Hankel function of the second kind Hₙ⁽²⁾(x) = Jₙ(x) − i·Yₙ(x)
///
/// Singular at x = 0 for every order (the imaginary part diverges).
///
/// # Example
/// ```
/// use math_audio_wave2d::special::hankel2;
/// let h = hankel2(-1, 2.0);
/// assert!((h + hankel2(1, 2.0)).norm() < 1e-15);
/// ```
#[inline]
pub fn hankel2(order: i32, x: f64) -> Complex64 {
    Complex64::new(bessel_j(order, x), -bessel_y(order, x))
}

/// Derivative of the Bessel function, Jₙ'(x) = Jₙ₋₁(x) − (n/x)·Jₙ(x)
pub fn bessel_j_derivative(order: i32, x: f64) -> f64 {
    bessel_j(order - 1, x) - order as f64 / x * bessel_j(order, x)
}

/// Derivative of the Hankel function, Hₙ⁽²⁾'(x) = Hₙ₋₁⁽²⁾(x) − (n/x)·Hₙ⁽²⁾(x)
pub fn hankel2_derivative(order: i32, x: f64) -> Complex64 {
    hankel2(order - 1, x) - hankel2(order, x) * (order as f64 / x)
}

/// `Y₁(z) + 2/(πz)`, the part of Y₁ left after removing its pole
///
/// Needed wherever the `1/z` singularity of Y₁ is subtracted analytically;
/// computing the sum directly cancels catastrophically for small z, so the
/// power series is used there. Behaves like `(z/π)·ln(z/2)` as z → 0.
pub fn bessel_y1_regularized(z: f64) -> f64 {
    if z < Y1_SERIES_THRESHOLD {
        y1_regularized_series(z)
    } else {
        bessel_y(1, z) + 2.0 / (PI * z)
    }
}

/// Power series of `Y₁(z) + 2/(πz)`
///
/// ```text
/// (2/π) J₁(z) ln(z/2) − (1/π) Σₘ [ψ(m+1) + ψ(m+2)] (−1)ᵐ (z/2)^(2m+1) / (m! (m+1)!)
/// ```
fn y1_regularized_series(z: f64) -> f64 {
    if z == 0.0 {
        return 0.0;
    }

    let half = 0.5 * z;
    let quarter_sq = half * half;

    // ψ(m+1) = −γ + H_m, ψ(m+2) = −γ + H_{m+1}
    let mut harmonic_m = 0.0;
    let mut term = half; // (−1)ᵐ (z/2)^(2m+1) / (m! (m+1)!)
    let mut sum = 0.0;
    for m in 0..12 {
        let harmonic_next = harmonic_m + 1.0 / (m as f64 + 1.0);
        sum += (harmonic_m + harmonic_next - 2.0 * EULER_GAMMA) * term;
        if term.abs() < 1e-18 * sum.abs().max(1e-300) {
            break;
        }
        term *= -quarter_sq / ((m as f64 + 1.0) * (m as f64 + 2.0));
        harmonic_m = harmonic_next;
    }

    2.0 / PI * bessel_j(1, z) * half.ln() - sum / PI
}
