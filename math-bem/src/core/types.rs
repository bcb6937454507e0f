//! Core type definitions for the 2D BEM solver
//!
//! The boundary is a closed or open polyline of straight elements with one
//! collocation point (the midpoint) and one unknown per element.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Range;
use thiserror::Error;

use super::constants::{DEFAULT_DENSITY, DEFAULT_SPEED_OF_SOUND};
use super::mesh::element::{segment_length, segment_midpoint, segment_normal};

// ============================================================================
// Physical Parameters
// ============================================================================

/// Physical parameters for the acoustic problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Speed of sound in the medium (m/s)
    pub speed_of_sound: f64,
    /// Density of the medium (kg/m³)
    pub density: f64,
    /// Frequency (Hz)
    pub frequency: f64,
    /// Wave number k = ω/c = 2πf/c
    pub wave_number: f64,
    /// Angular frequency ω = 2πf
    pub omega: f64,
    /// Characteristic impedance z0 = ρc
    pub impedance: f64,
}

impl PhysicsParams {
    /// Create new physics parameters from frequency and medium properties
    pub fn new(frequency: f64, speed_of_sound: f64, density: f64) -> Self {
        let omega = 2.0 * PI * frequency;
        Self {
            speed_of_sound,
            density,
            frequency,
            wave_number: omega / speed_of_sound,
            omega,
            impedance: density * speed_of_sound,
        }
    }

    /// Create parameters from a wave number and a characteristic impedance
    ///
    /// The speed of sound defaults to 343 m/s; the density is chosen so that
    /// `ρc = impedance`.
    pub fn from_wave_number(wave_number: f64, impedance: f64) -> Self {
        let speed_of_sound = DEFAULT_SPEED_OF_SOUND;
        let omega = wave_number * speed_of_sound;
        Self {
            speed_of_sound,
            density: impedance / speed_of_sound,
            frequency: omega / (2.0 * PI),
            wave_number,
            omega,
            impedance,
        }
    }

    /// Air at 20°C at the given frequency
    pub fn air(frequency: f64) -> Self {
        Self::new(frequency, DEFAULT_SPEED_OF_SOUND, DEFAULT_DENSITY)
    }

    /// Burton-Miller coupling constant: β = i/k
    pub fn burton_miller_beta(&self) -> Complex64 {
        self.burton_miller_beta_scaled(1.0)
    }

    /// Scaled Burton-Miller coupling: β = scale × i/k
    ///
    /// Any non-zero scale keeps the combined equation uniquely solvable.
    pub fn burton_miller_beta_scaled(&self, scale: f64) -> Complex64 {
        Complex64::new(0.0, scale / self.wave_number)
    }

    /// Dimensionless frequency ka for a body of the given size
    pub fn ka(&self, radius: f64) -> f64 {
        self.wave_number * radius
    }

    /// True if the wave number is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.wave_number.is_finite() && self.wave_number > 0.0
    }
}

// ============================================================================
// Mesh Structures
// ============================================================================

/// Errors raised while building a mesh
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Node array is not `n × 2`
    #[error("node array must have 2 columns, got {got}")]
    InvalidNodeDimension {
        /// Number of columns supplied
        got: usize,
    },
    /// Element refers to a node that does not exist
    #[error("element {element} refers to node {node}, but the mesh has {num_nodes} nodes")]
    NodeIndexOutOfRange {
        /// Element index
        element: usize,
        /// Offending node index
        node: usize,
        /// Number of nodes in the mesh
        num_nodes: usize,
    },
    /// Element with coincident corners
    #[error("element {element} has zero length")]
    DegenerateElement {
        /// Element index
        element: usize,
    },
    /// Admittance list does not match the element list
    #[error("expected {expected} admittances, got {got}")]
    AdmittanceLengthMismatch {
        /// Number of elements
        expected: usize,
        /// Number of admittances supplied
        got: usize,
    },
}

/// A straight boundary element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Node indices (start, end)
    pub connectivity: [usize; 2],
    /// Corner coordinates (start, end)
    pub corners: [[f64; 2]; 2],
    /// Midpoint, used as collocation point
    pub center: [f64; 2],
    /// Unit normal: tangent rotated clockwise by 90°
    pub normal: [f64; 2],
    /// Element length
    pub length: f64,
    /// Normalised surface admittance
    pub admittance: Complex64,
}

/// Boundary element mesh
///
/// Immutable once built; admittances are set through the consuming
/// `with_*` builders.
#[derive(Debug, Clone)]
pub struct Mesh {
    nodes: Array2<f64>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Build a mesh from node coordinates (`n × 2`) and node-index pairs
    ///
    /// Admittances default to zero (sound-hard boundary).
    ///
    /// # Example
    /// ```
    /// use math_audio_bem2d::core::types::Mesh;
    /// use ndarray::array;
    ///
    /// let nodes = array![[0.0, 0.0], [1.0, 0.0], [1.0, 2.0]];
    /// let mesh = Mesh::new(nodes, &[[0, 1], [1, 2]], None).unwrap();
    /// assert_eq!(mesh.num_elements(), 2);
    /// assert_eq!(mesh.element(0).normal, [0.0, -1.0]);
    /// ```
    pub fn new(
        nodes: Array2<f64>,
        connectivity: &[[usize; 2]],
        admittances: Option<&[Complex64]>,
    ) -> Result<Self, MeshError> {
        if nodes.ncols() != 2 {
            return Err(MeshError::InvalidNodeDimension { got: nodes.ncols() });
        }
        if let Some(values) = admittances {
            if values.len() != connectivity.len() {
                return Err(MeshError::AdmittanceLengthMismatch {
                    expected: connectivity.len(),
                    got: values.len(),
                });
            }
        }

        let num_nodes = nodes.nrows();
        let mut elements = Vec::with_capacity(connectivity.len());

        for (index, &[start, end]) in connectivity.iter().enumerate() {
            for node in [start, end] {
                if node >= num_nodes {
                    return Err(MeshError::NodeIndexOutOfRange {
                        element: index,
                        node,
                        num_nodes,
                    });
                }
            }

            let a = [nodes[[start, 0]], nodes[[start, 1]]];
            let b = [nodes[[end, 0]], nodes[[end, 1]]];
            let length = segment_length(a, b);
            if length == 0.0 {
                return Err(MeshError::DegenerateElement { element: index });
            }

            elements.push(Element {
                connectivity: [start, end],
                corners: [a, b],
                center: segment_midpoint(a, b),
                normal: segment_normal(a, b),
                length,
                admittance: admittances.map_or(Complex64::new(0.0, 0.0), |values| values[index]),
            });
        }

        Ok(Self { nodes, elements })
    }

    /// Build a mesh from point and index slices
    pub fn from_points(
        points: &[[f64; 2]],
        connectivity: &[[usize; 2]],
        admittances: Option<&[Complex64]>,
    ) -> Result<Self, MeshError> {
        let mut nodes = Array2::zeros((points.len(), 2));
        for (i, p) in points.iter().enumerate() {
            nodes[[i, 0]] = p[0];
            nodes[[i, 1]] = p[1];
        }
        Self::new(nodes, connectivity, admittances)
    }

    /// Replace all admittances
    pub fn with_admittances(mut self, admittances: &[Complex64]) -> Result<Self, MeshError> {
        if admittances.len() != self.elements.len() {
            return Err(MeshError::AdmittanceLengthMismatch {
                expected: self.elements.len(),
                got: admittances.len(),
            });
        }
        for (element, &y) in self.elements.iter_mut().zip(admittances) {
            element.admittance = y;
        }
        Ok(self)
    }

    /// Give every element the same admittance
    pub fn with_uniform_admittance(mut self, admittance: Complex64) -> Self {
        for element in &mut self.elements {
            element.admittance = admittance;
        }
        self
    }

    /// Set the admittance of the elements in `range`
    pub fn with_admittance_range(
        mut self,
        range: Range<usize>,
        admittance: Complex64,
    ) -> Result<Self, MeshError> {
        if range.end > self.elements.len() {
            return Err(MeshError::AdmittanceLengthMismatch {
                expected: self.elements.len(),
                got: range.end,
            });
        }
        for element in &mut self.elements[range] {
            element.admittance = admittance;
        }
        Ok(self)
    }

    /// Total number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.nrows()
    }

    /// Total number of elements
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Node coordinates (`num_nodes × 2`)
    pub fn nodes(&self) -> &Array2<f64> {
        &self.nodes
    }

    /// All elements
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Element by index
    ///
    /// # Panics
    /// If `index >= num_elements()`.
    pub fn element(&self, index: usize) -> &Element {
        &self.elements[index]
    }

    /// Corner pairs of every element
    pub fn corners(&self) -> Vec<[[f64; 2]; 2]> {
        self.elements.iter().map(|e| e.corners).collect()
    }

    /// Element midpoints (`num_elements × 2`)
    pub fn centers(&self) -> Array2<f64> {
        self.stack(|e| e.center)
    }

    /// Element normals (`num_elements × 2`)
    pub fn normals(&self) -> Array2<f64> {
        self.stack(|e| e.normal)
    }

    /// Element admittances
    pub fn admittances(&self) -> Array1<Complex64> {
        self.elements.iter().map(|e| e.admittance).collect()
    }

    /// Element lengths
    pub fn lengths(&self) -> Array1<f64> {
        self.elements.iter().map(|e| e.length).collect()
    }

    /// Total boundary length
    pub fn perimeter(&self) -> f64 {
        self.elements.iter().map(|e| e.length).sum()
    }

    /// Largest element length
    pub fn max_element_length(&self) -> f64 {
        self.elements.iter().map(|e| e.length).fold(0.0, f64::max)
    }

    fn stack(&self, select: impl Fn(&Element) -> [f64; 2]) -> Array2<f64> {
        let mut out = Array2::zeros((self.elements.len(), 2));
        for (i, element) in self.elements.iter().enumerate() {
            let v = select(element);
            out[[i, 0]] = v[0];
            out[[i, 1]] = v[1];
        }
        out
    }
}
