//! Built-in element-pair integrands
//!
//! Collocation is at element midpoints and the unknown is the surface
//! pressure p. With the admittance boundary condition `∂p/∂n = ikz₀Y p`
//! and the coupling `cⱼ = ikz₀Yⱼ`:
//!
//! ```text
//! Kirchhoff-Helmholtz   ½δᵢⱼ + ∫ⱼ h − cⱼ ∫ⱼ g
//! hypersingular         FP∫ⱼ ∂²g/∂nᵢ∂nⱼ − cⱼ ∫ⱼ h' + ½cⱼ δᵢⱼ
//! Burton-Miller         Kirchhoff-Helmholtz + β · hypersingular
//! ```
//!
//! On a straight self element h and h' vanish identically and the
//! hypersingular kernel reduces to a function of the distance alone, whose
//! `−1/(2πR²)` pole is integrated analytically in the finite-part sense.

use num_complex::Complex64;

use super::{ElementPairIntegrand, pair_quadrature};
use crate::core::integration::{LineQuadrature, QuadratureParams, line_integral_with_params};
use crate::core::kernels::{
    g_2d, hypersingular_self_finite_part, hypersingular_self_regularized_2d, kernels_2d,
};
use crate::core::mesh::element::distance;
use crate::core::types::{Element, Mesh};

/// `ikz₀Y` of a source element
#[inline]
fn admittance_coupling(k: f64, impedance: f64, element: &Element) -> Complex64 {
    Complex64::new(0.0, k * impedance) * element.admittance
}

/// Finite-part hypersingular integral over a straight self element
fn hypersingular_self_integral(element: &Element, k: f64, params: &QuadratureParams) -> Complex64 {
    let [a, b] = element.corners;
    let center = element.center;
    let regular = line_integral_with_params(
        |rs| hypersingular_self_regularized_2d(k, distance(center, rs)),
        a,
        b,
        LineQuadrature::Singular,
        params,
    );
    regular + hypersingular_self_finite_part(element.length)
}

/// Kirchhoff-Helmholtz element with an admittance boundary
///
/// Regular elements use the fixed Gauss rule, the self element the
/// adaptive rule with a midpoint breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmittanceIntegrand {
    /// Characteristic impedance z₀ = ρc
    pub impedance: f64,
    /// Quadrature parameters
    pub quadrature: QuadratureParams,
}

impl AdmittanceIntegrand {
    /// Create with default quadrature
    pub fn new(impedance: f64) -> Self {
        Self {
            impedance,
            quadrature: QuadratureParams::default(),
        }
    }

    /// Set the quadrature parameters
    pub fn with_quadrature(mut self, quadrature: QuadratureParams) -> Self {
        self.quadrature = quadrature;
        self
    }
}

impl ElementPairIntegrand for AdmittanceIntegrand {
    fn matrix_element(&self, mesh: &Mesh, row: usize, col: usize, k: f64) -> Complex64 {
        let observer = mesh.element(row);
        let source = mesh.element(col);
        let coupling = admittance_coupling(k, self.impedance, source);
        let [a, b] = source.corners;
        let x = observer.center;

        if row == col {
            let single = line_integral_with_params(
                |rs| g_2d(k, x, rs),
                a,
                b,
                LineQuadrature::Singular,
                &self.quadrature,
            );
            Complex64::new(0.5, 0.0) - coupling * single
        } else {
            line_integral_with_params(
                |rs| {
                    let kv = kernels_2d(k, x, rs, observer.normal, source.normal);
                    kv.h - coupling * kv.g
                },
                a,
                b,
                LineQuadrature::Regular,
                &self.quadrature,
            )
        }
    }
}

/// Normal-derivative (hypersingular) boundary equation element
#[derive(Debug, Clone, PartialEq)]
pub struct HypersingularIntegrand {
    /// Characteristic impedance z₀ = ρc
    pub impedance: f64,
    /// Quadrature parameters
    pub quadrature: QuadratureParams,
}

impl HypersingularIntegrand {
    /// Create with default quadrature
    pub fn new(impedance: f64) -> Self {
        Self {
            impedance,
            quadrature: QuadratureParams::default(),
        }
    }

    /// Set the quadrature parameters
    pub fn with_quadrature(mut self, quadrature: QuadratureParams) -> Self {
        self.quadrature = quadrature;
        self
    }
}

impl ElementPairIntegrand for HypersingularIntegrand {
    fn matrix_element(&self, mesh: &Mesh, row: usize, col: usize, k: f64) -> Complex64 {
        let observer = mesh.element(row);
        let source = mesh.element(col);
        let coupling = admittance_coupling(k, self.impedance, source);

        if row == col {
            return hypersingular_self_integral(source, k, &self.quadrature) + coupling * 0.5;
        }

        let [a, b] = source.corners;
        let x = observer.center;
        line_integral_with_params(
            |rs| {
                let kv = kernels_2d(k, x, rs, observer.normal, source.normal);
                kv.hypersingular - coupling * kv.h_adjoint
            },
            a,
            b,
            pair_quadrature(mesh, row, col, &self.quadrature, true),
            &self.quadrature,
        )
    }
}

/// Burton-Miller combined element: Kirchhoff-Helmholtz + β · hypersingular
///
/// β = i·`coupling_scale`/k.
#[derive(Debug, Clone, PartialEq)]
pub struct BurtonMillerIntegrand {
    /// Characteristic impedance z₀ = ρc
    pub impedance: f64,
    /// Scale of the coupling constant β = i·scale/k
    pub coupling_scale: f64,
    /// Quadrature parameters
    pub quadrature: QuadratureParams,
}

impl BurtonMillerIntegrand {
    /// Create with β = i/k and default quadrature
    pub fn new(impedance: f64) -> Self {
        Self {
            impedance,
            coupling_scale: 1.0,
            quadrature: QuadratureParams::default(),
        }
    }

    /// Set the coupling scale
    pub fn with_coupling_scale(mut self, scale: f64) -> Self {
        self.coupling_scale = scale;
        self
    }

    /// Set the quadrature parameters
    pub fn with_quadrature(mut self, quadrature: QuadratureParams) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Coupling constant at wave number `k`
    pub fn beta(&self, k: f64) -> Complex64 {
        Complex64::new(0.0, self.coupling_scale / k)
    }
}

impl ElementPairIntegrand for BurtonMillerIntegrand {
    fn matrix_element(&self, mesh: &Mesh, row: usize, col: usize, k: f64) -> Complex64 {
        let observer = mesh.element(row);
        let source = mesh.element(col);
        let coupling = admittance_coupling(k, self.impedance, source);
        let beta = self.beta(k);
        let [a, b] = source.corners;
        let x = observer.center;

        if row == col {
            let center = source.center;
            let regular = line_integral_with_params(
                |rs| {
                    let r = distance(center, rs);
                    beta * hypersingular_self_regularized_2d(k, r) - coupling * g_2d(k, center, rs)
                },
                a,
                b,
                LineQuadrature::Singular,
                &self.quadrature,
            );
            let jump = Complex64::new(0.5, 0.0) + beta * coupling * 0.5;
            return regular + beta * hypersingular_self_finite_part(source.length) + jump;
        }

        line_integral_with_params(
            |rs| {
                let kv = kernels_2d(k, x, rs, observer.normal, source.normal);
                kv.h - coupling * kv.g + beta * (kv.hypersingular - coupling * kv.h_adjoint)
            },
            a,
            b,
            pair_quadrature(mesh, row, col, &self.quadrature, true),
            &self.quadrature,
        )
    }
}

/// Boundary layer operators of the Helmholtz equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOperator {
    /// S: ∫ g
    SingleLayer,
    /// K: ∫ ∂g/∂n_rs
    DoubleLayer,
    /// K': ∫ ∂g/∂n_r
    AdjointDoubleLayer,
    /// N: FP∫ ∂²g/∂n_r∂n_rs
    Hypersingular,
}

/// One layer operator without jump terms
#[derive(Debug, Clone, PartialEq)]
pub struct LayerIntegrand {
    /// Which operator to assemble
    pub operator: LayerOperator,
    /// Quadrature parameters
    pub quadrature: QuadratureParams,
}

impl LayerIntegrand {
    /// Create with the given quadrature parameters
    pub fn new(operator: LayerOperator, quadrature: QuadratureParams) -> Self {
        Self {
            operator,
            quadrature,
        }
    }
}

impl ElementPairIntegrand for LayerIntegrand {
    fn matrix_element(&self, mesh: &Mesh, row: usize, col: usize, k: f64) -> Complex64 {
        let observer = mesh.element(row);
        let source = mesh.element(col);
        let [a, b] = source.corners;
        let x = observer.center;

        if row == col {
            return match self.operator {
                LayerOperator::SingleLayer => line_integral_with_params(
                    |rs| g_2d(k, x, rs),
                    a,
                    b,
                    LineQuadrature::Singular,
                    &self.quadrature,
                ),
                LayerOperator::DoubleLayer | LayerOperator::AdjointDoubleLayer => {
                    Complex64::new(0.0, 0.0)
                }
                LayerOperator::Hypersingular => {
                    hypersingular_self_integral(source, k, &self.quadrature)
                }
            };
        }

        let operator = self.operator;
        line_integral_with_params(
            |rs| {
                let kv = kernels_2d(k, x, rs, observer.normal, source.normal);
                match operator {
                    LayerOperator::SingleLayer => kv.g,
                    LayerOperator::DoubleLayer => kv.h,
                    LayerOperator::AdjointDoubleLayer => kv.h_adjoint,
                    LayerOperator::Hypersingular => kv.hypersingular,
                }
            },
            a,
            b,
            pair_quadrature(mesh, row, col, &self.quadrature, true),
            &self.quadrature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assembly::complex_system_matrix;
    use crate::core::mesh::{circle_mesh, line_mesh};
    use std::f64::consts::PI;

    const Z0: f64 = 343.0;

    fn close(a: Complex64, b: Complex64, tol: f64) -> bool {
        (a - b).norm() <= tol * (1.0 + b.norm())
    }

    #[test]
    fn test_self_element_jump_term() {
        // Rigid self element: only the jump term survives
        let mesh = line_mesh([0.0, 0.0], [1.0, 0.0], 1).unwrap();
        let value = AdmittanceIntegrand::new(Z0).matrix_element(&mesh, 0, 0, 2.0);
        assert!(close(value, Complex64::new(0.5, 0.0), 1e-14));
    }

    #[test]
    fn test_self_single_layer_matches_closed_form() {
        // Small element: ∫ g ≈ (L/2π)(ln(kL/4) − 1 + γ) + iL/4
        let length = 1e-3;
        let k = 1.0;
        let mesh = line_mesh([0.0, 0.0], [length, 0.0], 1).unwrap();
        let s = LayerIntegrand::new(LayerOperator::SingleLayer, QuadratureParams::default())
            .matrix_element(&mesh, 0, 0, k);

        let euler_gamma = 0.577_215_664_901_532_9;
        let expected = Complex64::new(
            length / (2.0 * PI) * ((k * length / 4.0).ln() - 1.0 + euler_gamma),
            length / 4.0,
        );
        assert!((s - expected).norm() < 1e-9);
    }

    #[test]
    fn test_self_hypersingular_low_frequency_limit() {
        // k → 0: the finite part dominates, N_ii → 2/(πL)
        let length = 0.2;
        let mesh = line_mesh([0.0, 0.0], [length, 0.0], 1).unwrap();
        let n = LayerIntegrand::new(LayerOperator::Hypersingular, QuadratureParams::default())
            .matrix_element(&mesh, 0, 0, 1e-4);
        assert!((n.re - 2.0 / (PI * length)).abs() < 1e-6);
    }

    #[test]
    fn test_burton_miller_is_combination() {
        let mesh = circle_mesh([0.0, 0.0], 1.0, 24)
            .unwrap()
            .with_uniform_admittance(Complex64::new(1.0 / Z0, 0.0));
        let k = 1.5;
        let beta = Complex64::new(0.0, 1.0 / k);

        let kh = AdmittanceIntegrand::new(Z0);
        let hyper = HypersingularIntegrand::new(Z0);
        let bm = BurtonMillerIntegrand::new(Z0);

        for (i, j) in [(0, 0), (0, 1), (3, 12), (5, 4)] {
            let combined = bm.matrix_element(&mesh, i, j, k);
            let mut expected = hyper.matrix_element(&mesh, i, j, k) * beta;
            if i == j || !mesh.element(j).is_near(mesh.element(i).center, 2.0) {
                expected += kh.matrix_element(&mesh, i, j, k);
            } else {
                // Near pairs: the Kirchhoff-Helmholtz part is integrated adaptively here
                let layers = |op| {
                    LayerIntegrand::new(op, QuadratureParams::default()).matrix_element(&mesh, i, j, k)
                };
                let coupling = Complex64::new(0.0, k * Z0) * mesh.element(j).admittance;
                expected += layers(LayerOperator::DoubleLayer)
                    - coupling * layers(LayerOperator::SingleLayer);
            }
            assert!(close(combined, expected, 1e-6), "({}, {}): {} vs {}", i, j, combined, expected);
        }
    }

    #[test]
    fn test_layer_matrices_satisfy_gauss_identity() {
        // k → 0: ∮ ∂g/∂n_rs seen from a point on a smooth part of the boundary is ½
        let mesh = circle_mesh([0.0, 0.0], 1.0, 64).unwrap();
        let k_matrix = complex_system_matrix(
            &LayerIntegrand::new(LayerOperator::DoubleLayer, QuadratureParams::default()),
            &mesh,
            1e-3,
        );
        for row in k_matrix.rows() {
            let sum: Complex64 = row.iter().sum();
            assert!((sum.re - 0.5).abs() < 1e-3, "row sum {}", sum);
        }
    }
}
