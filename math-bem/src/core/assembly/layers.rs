//! Precomputed layer-operator matrices
//!
//! The fast Burton-Miller path assembles S, K, K' and N once per wave
//! number and combines them algebraically:
//!
//! ```text
//! A = ½I + K − S·diag(c) + β·[N + (½I − K')·diag(c)],   cⱼ = ikz₀Yⱼ
//! ```
//!
//! Changing admittances, impedance or β then only costs an O(N²) update.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::{LayerIntegrand, LayerOperator, complex_system_matrix};
use crate::core::integration::QuadratureParams;
use crate::core::types::Mesh;

/// The four boundary layer operators of a mesh at one wave number
#[derive(Debug, Clone)]
pub struct LayerOperators {
    /// S
    pub single_layer: Array2<Complex64>,
    /// K
    pub double_layer: Array2<Complex64>,
    /// K'
    pub adjoint_double_layer: Array2<Complex64>,
    /// N (finite part)
    pub hypersingular: Array2<Complex64>,
    /// Wave number the operators were assembled at
    pub wave_number: f64,
}

impl LayerOperators {
    /// Assemble all four operators
    pub fn assemble(mesh: &Mesh, k: f64, quadrature: &QuadratureParams) -> Self {
        let assemble = |operator| {
            complex_system_matrix(&LayerIntegrand::new(operator, *quadrature), mesh, k)
        };

        Self {
            single_layer: assemble(LayerOperator::SingleLayer),
            double_layer: assemble(LayerOperator::DoubleLayer),
            adjoint_double_layer: assemble(LayerOperator::AdjointDoubleLayer),
            hypersingular: assemble(LayerOperator::Hypersingular),
            wave_number: k,
        }
    }

    /// Number of elements the operators were assembled on
    pub fn dim(&self) -> usize {
        self.single_layer.nrows()
    }

    /// Per-element coupling `ikz₀Yⱼ`
    pub fn admittance_coupling(&self, mesh: &Mesh, impedance: f64) -> Array1<Complex64> {
        let factor = Complex64::new(0.0, self.wave_number * impedance);
        mesh.admittances().mapv(|y| factor * y)
    }

    /// Kirchhoff-Helmholtz system `½I + K − S·diag(c)`
    pub fn kirchhoff_helmholtz_matrix(&self, mesh: &Mesh, impedance: f64) -> Array2<Complex64> {
        let coupling = self.admittance_coupling(mesh, impedance);
        let n = self.dim();
        let mut matrix = self.double_layer.clone();

        for i in 0..n {
            for j in 0..n {
                matrix[[i, j]] -= self.single_layer[[i, j]] * coupling[j];
            }
            matrix[[i, i]] += 0.5;
        }
        matrix
    }

    /// Burton-Miller system with coupling constant `beta`
    pub fn burton_miller_matrix(
        &self,
        mesh: &Mesh,
        impedance: f64,
        beta: Complex64,
    ) -> Array2<Complex64> {
        let coupling = self.admittance_coupling(mesh, impedance);
        let n = self.dim();
        let mut matrix = self.kirchhoff_helmholtz_matrix(mesh, impedance);

        for i in 0..n {
            for j in 0..n {
                let jump = if i == j { 0.5 } else { 0.0 };
                let hbie = self.hypersingular[[i, j]]
                    + (Complex64::new(jump, 0.0) - self.adjoint_double_layer[[i, j]]) * coupling[j];
                matrix[[i, j]] += beta * hbie;
            }
        }
        matrix
    }
}
