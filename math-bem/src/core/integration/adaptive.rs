//! Adaptive Gauss-Kronrod quadrature with breakpoints
//!
//! The interval is first split at the caller's breakpoints. Every panel is
//! then bisected recursively until the 21-point Kronrod estimate agrees with
//! the embedded 10-point Gauss estimate, using the QUADPACK error heuristic.
//! Kronrod nodes are strictly interior, so the integrand is never evaluated
//! at a breakpoint or at a panel boundary.

// Allow excessive precision for high-precision mathematical constants
#![allow(clippy::excessive_precision)]

use num_complex::Complex64;

/// Kronrod abscissas on [-1, 1] (non-negative half, descending)
///
/// Odd indices are the 10-point Gauss abscissas.
const XGK: [f64; 11] = [
    0.995657163025808080735527280689003,
    0.973906528517171720077964012084452,
    0.930157491355708226001207180059508,
    0.865063366688984510732096688423493,
    0.780817726586416897063717578345042,
    0.679409568299024406234327365114874,
    0.562757134668604683339000099272694,
    0.433395394129247190799265943165784,
    0.294392862701460198131126603103866,
    0.148874338981631210884826001129720,
    0.000000000000000000000000000000000,
];

/// 21-point Kronrod weights
const WGK: [f64; 11] = [
    0.011694638867371874278064396062192,
    0.032558162307964727478818972459390,
    0.054755896574351996031381300244580,
    0.075039674810919952767043140916190,
    0.093125454583697605535065465083366,
    0.109387158802297641899210590325805,
    0.123491976262065851077208233567640,
    0.134709217311473325928054001771707,
    0.142775938577060080797094273138717,
    0.147739104901338491374841515972068,
    0.149445554002916905664936468389821,
];

/// 10-point Gauss weights, matching `XGK[1], XGK[3], …, XGK[9]`
const WG: [f64; 5] = [
    0.066671344308688137593568809893332,
    0.149451349150580593145776339657697,
    0.219086362515982043995534934228163,
    0.269266719309996355091226921569469,
    0.295524224714752870173892994651338,
];

/// Result of a real adaptive integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveResult {
    /// Integral estimate
    pub value: f64,
    /// Estimated absolute error (sum over accepted panels)
    pub abs_error: f64,
    /// False when some panel hit the depth limit above its tolerance
    pub converged: bool,
}

/// Result of a complex adaptive integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexAdaptiveResult {
    /// Integral estimate
    pub value: Complex64,
    /// Estimated absolute error of real and imaginary parts combined
    pub abs_error: f64,
    /// True only if both real integrations converged
    pub converged: bool,
}

/// One 21-point Gauss-Kronrod estimate on [a, b]: (value, error)
fn gauss_kronrod_21<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    let center = 0.5 * (a + b);
    let half_length = 0.5 * (b - a);
    let abs_half_length = half_length.abs();

    let fc = f(center);
    let mut res_gauss = 0.0;
    let mut res_kronrod = WGK[10] * fc;
    let mut res_abs = res_kronrod.abs();

    let mut fv1 = [0.0; 10];
    let mut fv2 = [0.0; 10];

    for j in 0..5 {
        let jtw = 2 * j + 1;
        let abscissa = half_length * XGK[jtw];
        let f1 = f(center - abscissa);
        let f2 = f(center + abscissa);
        fv1[jtw] = f1;
        fv2[jtw] = f2;
        res_gauss += WG[j] * (f1 + f2);
        res_kronrod += WGK[jtw] * (f1 + f2);
        res_abs += WGK[jtw] * (f1.abs() + f2.abs());
    }

    for j in 0..5 {
        let jtwm1 = 2 * j;
        let abscissa = half_length * XGK[jtwm1];
        let f1 = f(center - abscissa);
        let f2 = f(center + abscissa);
        fv1[jtwm1] = f1;
        fv2[jtwm1] = f2;
        res_kronrod += WGK[jtwm1] * (f1 + f2);
        res_abs += WGK[jtwm1] * (f1.abs() + f2.abs());
    }

    let mean = 0.5 * res_kronrod;
    let mut res_asc = WGK[10] * (fc - mean).abs();
    for j in 0..10 {
        res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = res_kronrod * half_length;
    res_abs *= abs_half_length;
    res_asc *= abs_half_length;
    let mut error = ((res_kronrod - res_gauss) * half_length).abs();

    if res_asc != 0.0 && error != 0.0 {
        error = res_asc * (200.0 * error / res_asc).powf(1.5).min(1.0);
    }
    if res_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * res_abs);
    }

    (value, error)
}

/// Bisect [a, b] until its estimate meets `tolerance`
fn refine<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    estimate: (f64, f64),
    tolerance: f64,
    depth: usize,
    max_depth: usize,
    out: &mut AdaptiveResult,
) {
    let (value, error) = estimate;
    let mid = 0.5 * (a + b);

    if error <= tolerance || depth >= max_depth || mid <= a.min(b) || mid >= a.max(b) {
        out.value += value;
        out.abs_error += error;
        if error > tolerance {
            out.converged = false;
        }
        return;
    }

    let left = gauss_kronrod_21(f, a, mid);
    let right = gauss_kronrod_21(f, mid, b);
    refine(f, a, mid, left, tolerance, depth + 1, max_depth, out);
    refine(f, mid, b, right, tolerance, depth + 1, max_depth, out);
}

/// Integrate a real function over [a, b]
///
/// `breakpoints` are abscissas where the integrand misbehaves; those strictly
/// inside (a, b) split the interval into panels that are refined separately.
/// Each panel is accepted once its error estimate falls below
/// `max(epsabs, epsrel·|panel estimate|)`, or after `max_depth` bisections.
///
/// # Example
/// ```
/// use math_audio_bem2d::core::integration::adaptive_integrate;
///
/// // ∫₀¹ ln|t − ½| dt = ln ½ − 1
/// let result = adaptive_integrate(|t: f64| (t - 0.5).abs().ln(), 0.0, 1.0, &[0.5], 1.49e-8, 1.49e-8, 30);
/// assert!((result.value - (0.5_f64.ln() - 1.0)).abs() < 1e-8);
/// ```
pub fn adaptive_integrate<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    breakpoints: &[f64],
    epsabs: f64,
    epsrel: f64,
    max_depth: usize,
) -> AdaptiveResult {
    let mut out = AdaptiveResult {
        value: 0.0,
        abs_error: 0.0,
        converged: true,
    };
    if a == b {
        return out;
    }

    let (lo, hi) = (a.min(b), a.max(b));
    let mut cuts: Vec<f64> = breakpoints
        .iter()
        .copied()
        .filter(|&x| x > lo && x < hi)
        .collect();
    cuts.sort_by(f64::total_cmp);
    cuts.dedup();
    if a > b {
        cuts.reverse();
    }

    let mut edges = Vec::with_capacity(cuts.len() + 2);
    edges.push(a);
    edges.extend(cuts);
    edges.push(b);

    for panel in edges.windows(2) {
        let estimate = gauss_kronrod_21(&f, panel[0], panel[1]);
        let tolerance = epsabs.max(epsrel * estimate.0.abs());
        refine(&f, panel[0], panel[1], estimate, tolerance, 0, max_depth, &mut out);
    }

    out
}

/// Integrate a complex function over [a, b]
///
/// Real and imaginary parts are integrated as two independent real adaptive
/// quadratures and recombined.
pub fn complex_adaptive_integrate<F: Fn(f64) -> Complex64>(
    f: F,
    a: f64,
    b: f64,
    breakpoints: &[f64],
    epsabs: f64,
    epsrel: f64,
    max_depth: usize,
) -> ComplexAdaptiveResult {
    let re = adaptive_integrate(|t| f(t).re, a, b, breakpoints, epsabs, epsrel, max_depth);
    let im = adaptive_integrate(|t| f(t).im, a, b, breakpoints, epsabs, epsrel, max_depth);

    ComplexAdaptiveResult {
        value: Complex64::new(re.value, im.value),
        abs_error: re.abs_error.hypot(im.abs_error),
        converged: re.converged && im.converged,
    }
}
