//! Surface pressure solvers
//!
//! Every solver takes the mesh, the incident pressure at the element
//! centers, the incident pressure gradient there (N × 2) and the physical
//! parameters, and returns the surface pressure per element.
//!
//! - [`direct`] - Kirchhoff-Helmholtz and Burton-Miller systems assembled
//!   element by element, solved by dense LU
//! - [`fast`] - Burton-Miller assembled from precomputed layer operators

pub mod direct;
pub mod fast;

pub use direct::{
    burton_miller_solver, burton_miller_solver_with_params, kirchhoff_helmholtz_solver,
    kirchhoff_helmholtz_solver_with_params,
};
pub use fast::{fast_burton_miller_solver, fast_burton_miller_solver_with_params, solve_with_operators};

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::core::bem_solver::BemError;
use crate::core::incident::normal_component;
use crate::core::types::{Mesh, PhysicsParams};

/// Check the excitation shapes against the mesh and the wave number
pub fn validate_inputs(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
) -> Result<(), BemError> {
    let n = mesh.num_elements();
    if n == 0 {
        return Err(BemError::InvalidParameters("mesh has no elements".to_string()));
    }
    if p_inc.len() != n {
        return Err(BemError::DimensionMismatch {
            what: "incident pressure",
            expected: n,
            got: p_inc.len(),
        });
    }
    if grad_p_inc.nrows() != n {
        return Err(BemError::DimensionMismatch {
            what: "incident gradient rows",
            expected: n,
            got: grad_p_inc.nrows(),
        });
    }
    if grad_p_inc.ncols() != 2 {
        return Err(BemError::DimensionMismatch {
            what: "incident gradient columns",
            expected: 2,
            got: grad_p_inc.ncols(),
        });
    }
    if !physics.is_valid() {
        return Err(BemError::InvalidParameters(format!(
            "wave number must be positive and finite, got {}",
            physics.wave_number
        )));
    }
    Ok(())
}

/// Burton-Miller right-hand side `p_inc + β·(n·∇p_inc)` at the element centers
pub fn burton_miller_rhs(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    beta: Complex64,
) -> Array1<Complex64> {
    let dpdn = normal_component(grad_p_inc, &mesh.normals());
    p_inc + &dpdn.mapv(|v| beta * v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::incident::IncidentField;
    use crate::core::mesh::circle_mesh;

    #[test]
    fn test_validate_inputs_rejects_mismatch() {
        let mesh = circle_mesh([0.0, 0.0], 1.0, 8).unwrap();
        let physics = PhysicsParams::from_wave_number(1.0, 343.0);
        let (p, grad) = IncidentField::plane_wave([1.0, 0.0], 1.0).surface_excitation(&mesh, &physics);

        assert!(validate_inputs(&mesh, &p, &grad, &physics).is_ok());

        let short = Array1::zeros(7);
        assert!(matches!(
            validate_inputs(&mesh, &short, &grad, &physics),
            Err(BemError::DimensionMismatch { expected: 8, got: 7, .. })
        ));

        let wide = Array2::zeros((8, 3));
        assert!(matches!(
            validate_inputs(&mesh, &p, &wide, &physics),
            Err(BemError::DimensionMismatch { expected: 2, got: 3, .. })
        ));

        let static_physics = PhysicsParams::from_wave_number(0.0, 343.0);
        assert!(matches!(
            validate_inputs(&mesh, &p, &grad, &static_physics),
            Err(BemError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_burton_miller_rhs() {
        let mesh = circle_mesh([0.0, 0.0], 1.0, 4).unwrap();
        let p = Array1::from_elem(4, Complex64::new(1.0, 0.0));
        let mut grad = Array2::zeros((4, 2));
        for i in 0..4 {
            grad[[i, 0]] = Complex64::new(2.0, 0.0);
        }
        let beta = Complex64::new(0.0, 0.5);
        let rhs = burton_miller_rhs(&mesh, &p, &grad, beta);

        let normals = mesh.normals();
        for i in 0..4 {
            let expected = Complex64::new(1.0, 0.0) + beta * 2.0 * normals[[i, 0]];
            assert!((rhs[i] - expected).norm() < 1e-14);
        }
    }
}
