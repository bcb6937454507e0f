//! Burton-Miller solve from precomputed layer operators
//!
//! Assembling S, K, K' and N once lets several admittance configurations or
//! coupling constants be solved at one wave number for the cost of an
//! O(N²) combination and a factorisation each.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::{burton_miller_rhs, validate_inputs};
use crate::core::assembly::LayerOperators;
use crate::core::bem_solver::BemError;
use crate::core::integration::QuadratureParams;
use crate::core::types::{Mesh, PhysicsParams};
use math_audio_dense::lu_solve;

/// Fast Burton-Miller solve with β = i/k and default quadrature
pub fn fast_burton_miller_solver(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
) -> Result<Array1<Complex64>, BemError> {
    fast_burton_miller_solver_with_params(
        mesh,
        p_inc,
        grad_p_inc,
        physics,
        1.0,
        &QuadratureParams::default(),
    )
}

/// Fast Burton-Miller solve with β = i·`coupling_scale`/k
pub fn fast_burton_miller_solver_with_params(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
    coupling_scale: f64,
    quadrature: &QuadratureParams,
) -> Result<Array1<Complex64>, BemError> {
    validate_inputs(mesh, p_inc, grad_p_inc, physics)?;
    log::info!(
        "Fast Burton-Miller solve: {} elements, k = {:.4}",
        mesh.num_elements(),
        physics.wave_number
    );

    let operators = LayerOperators::assemble(mesh, physics.wave_number, quadrature);
    let beta = physics.burton_miller_beta_scaled(coupling_scale);
    solve_with_operators(&operators, mesh, p_inc, grad_p_inc, physics, beta)
}

/// Solve the Burton-Miller system built from already assembled operators
///
/// The operators must belong to `mesh` and to the wave number of `physics`;
/// admittances and impedance are taken from the arguments.
pub fn solve_with_operators(
    operators: &LayerOperators,
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
    beta: Complex64,
) -> Result<Array1<Complex64>, BemError> {
    validate_inputs(mesh, p_inc, grad_p_inc, physics)?;
    if operators.dim() != mesh.num_elements() {
        return Err(BemError::DimensionMismatch {
            what: "layer operators",
            expected: mesh.num_elements(),
            got: operators.dim(),
        });
    }
    if operators.wave_number != physics.wave_number {
        return Err(BemError::InvalidParameters(format!(
            "operators assembled at k = {}, solving at k = {}",
            operators.wave_number, physics.wave_number
        )));
    }

    let matrix = operators.burton_miller_matrix(mesh, physics.impedance, beta);
    let rhs = burton_miller_rhs(mesh, p_inc, grad_p_inc, beta);
    Ok(lu_solve(&matrix, &rhs)?)
}
