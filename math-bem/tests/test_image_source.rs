//! Line source above a rigid plane
//!
//! A long straight boundary stands in for the infinite plane y = 0; the
//! scattered field above it must match the field of the image source.

use math_audio_bem2d::analytical::{Point, image_source_2d};
use math_audio_bem2d::core::mesh::line_mesh;
use math_audio_bem2d::core::postprocess::{AdmittanceFieldIntegrand, calc_solution_at};
use math_audio_bem2d::core::solver::kirchhoff_helmholtz_solver;
use math_audio_bem2d::core::{IncidentField, PhysicsParams};
use ndarray::array;
use num_complex::Complex64;
use std::f64::consts::PI;

#[test]
fn test_line_source_above_rigid_plane() {
    let k = 2.0 * PI * 300.0 / 343.0;
    let source = [0.0, 1.0];
    let z0 = 343.0 * 1.21;

    // Running in −x puts the normals on +y, facing the source
    let mesh = line_mesh([10.0, 0.0], [-10.0, 0.0], 200).unwrap();
    let physics = PhysicsParams::from_wave_number(k, z0);
    let incident = IncidentField::line_source(source, 1.0);
    let (p_inc, grad) = incident.surface_excitation(&mesh, &physics);

    let surface = kirchhoff_helmholtz_solver(&mesh, &p_inc, &grad, &physics).unwrap();

    // Collinear elements do not interact: the plane doubles the incident pressure
    for (p, pi) in surface.iter().zip(p_inc.iter()) {
        assert!((*p - *pi * 2.0).norm() < 1e-12 * pi.norm().max(1.0));
    }

    let field_point = array![[0.0, 0.5]];
    let scattered = calc_solution_at(
        &AdmittanceFieldIntegrand::new(z0),
        &mesh,
        &surface,
        &field_point,
        k,
    )
    .unwrap();

    let image = image_source_2d(
        k,
        Point::new(source[0], source[1]),
        Complex64::new(1.0, 0.0),
        vec![Point::new(0.0, 0.5)],
    );
    let expected = image.pressure[0];
    let error = (scattered[0] - expected).norm() / expected.norm();
    assert!(error < 0.01, "image source mismatch: {:.3e}", error);
}
