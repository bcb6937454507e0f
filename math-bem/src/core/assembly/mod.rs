//! Dense BEM matrix assembly
//!
//! The assembler is formulation-agnostic: it visits every ordered pair of
//! (observation, source) elements and asks an [`ElementPairIntegrand`] for
//! the coupling coefficient. Integrands own the kernel combination, the
//! choice of quadrature and the diagonal jump term.
//!
//! - [`integrands`] - Kirchhoff-Helmholtz, hypersingular and Burton-Miller
//!   elements, plus the individual layer operators
//! - [`layers`] - Precomputed layer-operator matrices for the fast
//!   Burton-Miller path

pub mod integrands;
pub mod layers;

pub use integrands::{
    AdmittanceIntegrand, BurtonMillerIntegrand, HypersingularIntegrand, LayerIntegrand,
    LayerOperator,
};
pub use layers::LayerOperators;

use ndarray::Array2;
use num_complex::Complex64;
use std::time::Instant;

use crate::core::integration::{LineQuadrature, QuadratureParams};
use crate::core::parallel::parallel_map_indexed;
use crate::core::types::Mesh;

/// Coupling coefficient between observation element `row` and source
/// element `col`
///
/// Implemented by the built-in integrand structs and by any closure
/// `Fn(&Mesh, usize, usize, f64) -> Complex64`.
pub trait ElementPairIntegrand: Sync {
    /// Matrix entry (row, col) at wave number `k`
    fn matrix_element(&self, mesh: &Mesh, row: usize, col: usize, k: f64) -> Complex64;
}

impl<F> ElementPairIntegrand for F
where
    F: Fn(&Mesh, usize, usize, f64) -> Complex64 + Sync,
{
    fn matrix_element(&self, mesh: &Mesh, row: usize, col: usize, k: f64) -> Complex64 {
        self(mesh, row, col, k)
    }
}

/// Assemble the dense N × N matrix of `integrand` over all element pairs
///
/// Rows are computed in parallel when the `parallel` feature is enabled.
pub fn complex_system_matrix<I>(integrand: &I, mesh: &Mesh, k: f64) -> Array2<Complex64>
where
    I: ElementPairIntegrand + ?Sized,
{
    let n = mesh.num_elements();
    let start = Instant::now();

    let rows: Vec<Vec<Complex64>> = parallel_map_indexed(n, |i| {
        (0..n)
            .map(|j| integrand.matrix_element(mesh, i, j, k))
            .collect()
    });

    let mut matrix = Array2::zeros((n, n));
    for (i, row) in rows.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }

    log::debug!(
        "Assembled {}x{} system matrix (k = {:.4}) in {:.2?}",
        n,
        n,
        k,
        start.elapsed()
    );
    matrix
}

/// Quadrature for source element `col` seen from the center of `row`
///
/// The self element is singular. With `near_field` set, elements whose
/// center lies within `near_field_factor` lengths of the collocation point
/// are integrated adaptively.
pub fn pair_quadrature(
    mesh: &Mesh,
    row: usize,
    col: usize,
    params: &QuadratureParams,
    near_field: bool,
) -> LineQuadrature {
    if row == col {
        LineQuadrature::Singular
    } else if near_field
        && mesh
            .element(col)
            .is_near(mesh.element(row).center, params.near_field_factor)
    {
        LineQuadrature::NearSingular
    } else {
        LineQuadrature::Regular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_element_mesh() -> Mesh {
        Mesh::from_points(&[[0.0, 0.0], [1.0, 0.0], [1.0, 2.0]], &[[0, 1], [1, 2]], None).unwrap()
    }

    #[test]
    fn test_closure_integrand() {
        let mesh = two_element_mesh();
        let stub = |mesh: &Mesh, i: usize, j: usize, _k: f64| {
            let c = mesh.element(i).center;
            let diagonal = if i == j { 1.0 } else { 0.0 };
            Complex64::new(c[0] + diagonal, c[1])
        };

        let matrix = complex_system_matrix(&stub, &mesh, 1.0);

        assert_eq!(matrix[[0, 0]], Complex64::new(1.5, 0.0));
        assert_eq!(matrix[[0, 1]], Complex64::new(0.5, 0.0));
        assert_eq!(matrix[[1, 0]], Complex64::new(1.0, 1.0));
        assert_eq!(matrix[[1, 1]], Complex64::new(2.0, 1.0));
    }

    #[test]
    fn test_trait_object_integrand() {
        let mesh = two_element_mesh();
        let constant = |_: &Mesh, _: usize, _: usize, k: f64| Complex64::new(k, 0.0);
        let integrand: &dyn ElementPairIntegrand = &constant;

        let matrix = complex_system_matrix(integrand, &mesh, 3.0);
        assert!(matrix.iter().all(|v| *v == Complex64::new(3.0, 0.0)));
    }

    #[test]
    fn test_pair_quadrature_selection() {
        let mesh = crate::core::mesh::line_mesh([0.0, 0.0], [10.0, 0.0], 10).unwrap();
        let params = QuadratureParams::default();

        assert_eq!(pair_quadrature(&mesh, 3, 3, &params, true), LineQuadrature::Singular);
        assert_eq!(pair_quadrature(&mesh, 3, 4, &params, true), LineQuadrature::NearSingular);
        assert_eq!(pair_quadrature(&mesh, 3, 4, &params, false), LineQuadrature::Regular);
        assert_eq!(pair_quadrature(&mesh, 3, 6, &params, true), LineQuadrature::Regular);
    }
}
