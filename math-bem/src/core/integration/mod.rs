//! Numerical integration along straight boundary elements
//!
//! ## Module Organization
//!
//! - [`gauss`] - Fixed Gauss-Legendre rules for regular element integrals
//! - [`adaptive`] - 21-point Gauss-Kronrod adaptive bisection with breakpoints
//! - [`line`] - Complex line integrals over an element, choosing the rule from
//!   the element's position relative to the collocation point

pub mod adaptive;
pub mod gauss;
pub mod line;

use serde::{Deserialize, Serialize};

pub use adaptive::{
    AdaptiveResult, ComplexAdaptiveResult, adaptive_integrate, complex_adaptive_integrate,
};
pub use gauss::*;
pub use line::{LineQuadrature, line_integral, line_integral_with_params, point_on_segment};

/// Quadrature parameters shared by assembly and field evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureParams {
    /// Gauss-Legendre order for regular element integrals
    pub gauss_order: usize,
    /// Absolute tolerance of the adaptive rule
    pub epsabs: f64,
    /// Relative tolerance of the adaptive rule
    pub epsrel: f64,
    /// Maximum bisection depth of the adaptive rule
    pub max_depth: usize,
    /// Elements whose center lies closer than this many element lengths to the
    /// collocation point are integrated adaptively
    pub near_field_factor: f64,
}

impl Default for QuadratureParams {
    fn default() -> Self {
        Self {
            gauss_order: 5,
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            max_depth: 30,
            near_field_factor: 2.0,
        }
    }
}

impl QuadratureParams {
    /// Set the Gauss-Legendre order used for regular elements
    pub fn with_gauss_order(mut self, order: usize) -> Self {
        self.gauss_order = order;
        self
    }

    /// Set absolute and relative tolerances of the adaptive rule
    pub fn with_tolerances(mut self, epsabs: f64, epsrel: f64) -> Self {
        self.epsabs = epsabs;
        self.epsrel = epsrel;
        self
    }

    /// Set the near-field factor
    pub fn with_near_field_factor(mut self, factor: f64) -> Self {
        self.near_field_factor = factor;
        self
    }
}
