//! Kernel functions of the 2D Helmholtz boundary integral equations
//!
//! `r` is the observation (field) point, `rs` the source point on the
//! boundary and R = |r − rs|. With g = (i/4)·H₀⁽²⁾(kR):
//!
//! | kernel | definition |
//! |--------|------------|
//! | [`g_2d`] | g |
//! | [`h_2d`] | ∂g/∂n_rs |
//! | [`h_adjoint_2d`] | ∂g/∂n_r |
//! | [`hypersingular_2d`] | ∂²g/∂n_r∂n_rs |
//!
//! None of them is defined at r = rs; callers keep the observation point off
//! the integration abscissas.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::core::mesh::element::dot;
use math_audio_wave2d::special::{bessel_j, bessel_y1_regularized, greens_function_2d, hankel2};

#[inline]
fn separation(r: [f64; 2], rs: [f64; 2]) -> ([f64; 2], f64) {
    let d = [r[0] - rs[0], r[1] - rs[1]];
    (d, d[0].hypot(d[1]))
}

/// Free-space Green's function g = (i/4)·H₀⁽²⁾(k|r − rs|)
///
/// # Example
/// ```
/// use math_audio_bem2d::core::kernels::g_2d;
/// use math_audio_wave2d::special::hankel2;
/// use num_complex::Complex64;
///
/// let g = g_2d(2.0, [0.0, 0.0], [3.0, 4.0]);
/// assert!((g - Complex64::new(0.0, 0.25) * hankel2(0, 10.0)).norm() < 1e-14);
/// ```
#[inline]
pub fn g_2d(k: f64, r: [f64; 2], rs: [f64; 2]) -> Complex64 {
    let (_, distance) = separation(r, rs);
    greens_function_2d(distance, k)
}

/// Normal derivative of g with respect to the source point along `n`
///
/// ```text
/// h = (ik/(8R))·(n·(rs − r))·[H₋₁⁽²⁾(kR) − H₁⁽²⁾(kR)]
/// ```
/// Zero when `n` is perpendicular to `rs − r`.
pub fn h_2d(n: [f64; 2], k: f64, r: [f64; 2], rs: [f64; 2]) -> Complex64 {
    let (_, distance) = separation(r, rs);
    let kr = k * distance;
    let projection = n[0] * (rs[0] - r[0]) + n[1] * (rs[1] - r[1]);
    Complex64::new(0.0, k / (8.0 * distance)) * projection * (hankel2(-1, kr) - hankel2(1, kr))
}

/// Normal derivative of g with respect to the field point along `n_r`
///
/// Equal to `−h(n_r, k, r, rs)` since g depends on r − rs only.
#[inline]
pub fn h_adjoint_2d(n_r: [f64; 2], k: f64, r: [f64; 2], rs: [f64; 2]) -> Complex64 {
    -h_2d(n_r, k, r, rs)
}

/// Hypersingular kernel ∂²g/∂n_r∂n_rs
///
/// With u = (r − rs)/R:
/// ```text
/// (ik²/4) H₀ (n_r·u)(n_rs·u) − (ik/(2R)) H₁ (n_r·u)(n_rs·u) + (ik/(4R)) H₁ (n_r·n_rs)
/// ```
/// Symmetric under r ↔ rs with the normals held in place. Every term
/// carries one factor of each normal, so the kernel is zero when both
/// normals vanish.
pub fn hypersingular_2d(
    k: f64,
    r: [f64; 2],
    rs: [f64; 2],
    n_r: [f64; 2],
    n_rs: [f64; 2],
) -> Complex64 {
    let (d, distance) = separation(r, rs);
    let kr = k * distance;
    hypersingular_from_hankel(k, d, distance, n_r, n_rs, hankel2(0, kr), hankel2(1, kr))
}

fn hypersingular_from_hankel(
    k: f64,
    d: [f64; 2],
    distance: f64,
    n_r: [f64; 2],
    n_rs: [f64; 2],
    h0: Complex64,
    h1: Complex64,
) -> Complex64 {
    let u = [d[0] / distance, d[1] / distance];
    let a = dot(n_r, u);
    let b = dot(n_rs, u);
    let c = dot(n_r, n_rs);
    let i = Complex64::i();

    i * (k * k / 4.0) * h0 * (a * b) - i * (k / (2.0 * distance)) * h1 * (a * b)
        + i * (k / (4.0 * distance)) * h1 * c
}

/// Hypersingular kernel on a straight self element, with its pole removed
///
/// When r and rs lie on the same straight element the normals coincide and
/// are perpendicular to r − rs, leaving `(ik/(4R))·H₁⁽²⁾(kR)`. This returns
/// that value plus `1/(2πR²)`, which is bounded (logarithmic) as R → 0:
/// ```text
/// (ik/(4R))·J₁(kR) + (k/(4R))·(Y₁(kR) + 2/(πkR))
/// ```
pub fn hypersingular_self_regularized_2d(k: f64, distance: f64) -> Complex64 {
    let kr = k * distance;
    let scale = k / (4.0 * distance);
    Complex64::new(scale * bessel_y1_regularized(kr), scale * bessel_j(1, kr))
}

/// Finite part of `−∫ 1/(2πR²)` over an element of the given length,
/// collocated at its midpoint: `2/(πL)`
#[inline]
pub fn hypersingular_self_finite_part(length: f64) -> f64 {
    2.0 / (PI * length)
}

/// All four kernels at one pair of points, sharing the Hankel evaluations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelValues {
    /// g
    pub g: Complex64,
    /// ∂g/∂n_rs
    pub h: Complex64,
    /// ∂g/∂n_r
    pub h_adjoint: Complex64,
    /// ∂²g/∂n_r∂n_rs
    pub hypersingular: Complex64,
}

/// Evaluate g, h, h' and the hypersingular kernel together
pub fn kernels_2d(
    k: f64,
    r: [f64; 2],
    rs: [f64; 2],
    n_r: [f64; 2],
    n_rs: [f64; 2],
) -> KernelValues {
    let (d, distance) = separation(r, rs);
    let kr = k * distance;
    let h0 = hankel2(0, kr);
    let h1 = hankel2(1, kr);

    // ∂g/∂n_rs = (ik/4)·H₁·(n_rs·u), ∂g/∂n_r = −(ik/4)·H₁·(n_r·u)
    let factor = Complex64::new(0.0, k / (4.0 * distance)) * h1;

    KernelValues {
        g: Complex64::new(0.0, 0.25) * h0,
        h: factor * dot(n_rs, d),
        h_adjoint: -factor * dot(n_r, d),
        hypersingular: hypersingular_from_hankel(k, d, distance, n_r, n_rs, h0, h1),
    }
}
