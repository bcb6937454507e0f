//! Mesh generators for analytical test geometries
//!
//! Circles for scattering validation against the cylindrical wave
//! expansion, straight lines for half-space (image source) checks.

use ndarray::Array2;
use std::f64::consts::PI;

use crate::core::types::{Mesh, MeshError};

/// Generate a closed circle mesh with outward normals
///
/// Nodes are placed counter-clockwise starting at angle 0; element `i`
/// connects node `i` to node `i + 1` (the last one closes the loop).
///
/// # Arguments
/// * `center` - Circle center
/// * `radius` - Circle radius
/// * `num_elements` - Number of straight elements (at least 3)
///
/// # Example
/// ```
/// use math_audio_bem2d::core::mesh::circle_mesh;
///
/// let mesh = circle_mesh([0.0, 0.0], 1.0, 64).unwrap();
/// let n = mesh.element(0).normal;
/// let c = mesh.element(0).center;
/// assert!(n[0] * c[0] + n[1] * c[1] > 0.0);
/// ```
pub fn circle_mesh(center: [f64; 2], radius: f64, num_elements: usize) -> Result<Mesh, MeshError> {
    let n = num_elements.max(3);
    let mut nodes = Array2::zeros((n, 2));
    for i in 0..n {
        let theta = 2.0 * PI * i as f64 / n as f64;
        nodes[[i, 0]] = center[0] + radius * theta.cos();
        nodes[[i, 1]] = center[1] + radius * theta.sin();
    }

    let connectivity: Vec<[usize; 2]> = (0..n).map(|i| [i, (i + 1) % n]).collect();
    Mesh::new(nodes, &connectivity, None)
}

/// Number of circle elements so that no element exceeds `max_element_size`
///
/// Never fewer than `min_elements`.
pub fn circle_element_count(radius: f64, max_element_size: f64, min_elements: usize) -> usize {
    let needed = (2.0 * PI * radius / max_element_size).ceil();
    if needed.is_finite() && needed > 0.0 {
        (needed as usize).max(min_elements)
    } else {
        min_elements
    }
}

/// Generate an open straight-line mesh from `start` to `end`
///
/// Normals point to the right of the direction of travel, so a line running
/// in −x has normals along +y.
pub fn line_mesh(start: [f64; 2], end: [f64; 2], num_elements: usize) -> Result<Mesh, MeshError> {
    let n = num_elements.max(1);
    let mut nodes = Array2::zeros((n + 1, 2));
    for i in 0..=n {
        let t = i as f64 / n as f64;
        nodes[[i, 0]] = start[0] + t * (end[0] - start[0]);
        nodes[[i, 1]] = start[1] + t * (end[1] - start[1]);
    }

    let connectivity: Vec<[usize; 2]> = (0..n).map(|i| [i, i + 1]).collect();
    Mesh::new(nodes, &connectivity, None)
}
