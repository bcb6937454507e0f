//! JSON/TOML description of a 2D scattering problem
//!
//! Every section is optional: a bare `{}` is the default Burton-Miller
//! solver with default quadrature. Problem sections (physics, mesh,
//! boundary conditions, sources) are only needed to build a full problem.
//!
//! ## Example JSON Configuration
//!
//! ```json
//! {
//!     "physics": {
//!         "frequency": 500.0,
//!         "speed_of_sound": 343.0,
//!         "density": 1.21
//!     },
//!     "mesh": {
//!         "circle": { "center": [0.0, 0.0], "radius": 0.5, "elements": 128 }
//!     },
//!     "solver": {
//!         "formulation": "burton_miller",
//!         "coupling_scale": 1.0
//!     },
//!     "quadrature": {
//!         "gauss_order": 5,
//!         "epsabs": 1.49e-8,
//!         "epsrel": 1.49e-8
//!     },
//!     "boundary_conditions": [
//!         { "elements": [0, 63], "type": "specific_admittance", "value": 0.5 }
//!     ],
//!     "sources": {
//!         "plane_waves": [{ "direction": [1.0, 0.0], "amplitude": 1.0 }]
//!     }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::bem_solver::Formulation;
use crate::core::incident::IncidentField;
use crate::core::integration::QuadratureParams;
use crate::core::mesh::circle_mesh;
use crate::core::types::{Mesh, MeshError, PhysicsParams};

/// Native BEM configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BemConfig {
    /// Problem description
    #[serde(default)]
    pub description: String,

    /// Physics parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsConfig>,

    /// Mesh configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshConfig>,

    /// Solver configuration
    #[serde(default)]
    pub solver: SolverConfig,

    /// Quadrature parameters
    #[serde(default)]
    pub quadrature: QuadratureParams,

    /// Boundary admittances by element range
    #[serde(default)]
    pub boundary_conditions: Vec<BoundaryConditionConfig>,

    /// Excitation sources
    #[serde(default)]
    pub sources: SourceConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Physics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Frequency in Hz
    pub frequency: f64,

    /// Speed of sound in m/s
    #[serde(default = "default_speed_of_sound")]
    pub speed_of_sound: f64,

    /// Medium density in kg/m³
    #[serde(default = "default_density")]
    pub density: f64,
}

fn default_speed_of_sound() -> f64 {
    crate::core::constants::DEFAULT_SPEED_OF_SOUND
}
fn default_density() -> f64 {
    crate::core::constants::DEFAULT_DENSITY
}

/// Mesh configuration
///
/// Either a generated circle or explicit nodes and elements, inline or from
/// files (JSON or whitespace / comma separated text).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Generated circular boundary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle: Option<CircleMeshConfig>,

    /// Path to nodes file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_file: Option<PathBuf>,

    /// Inline nodes data [[x, y], ...]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<[f64; 2]>>,

    /// Path to elements file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements_file: Option<PathBuf>,

    /// Inline elements data [[start, end], ...]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<[usize; 2]>>,
}

/// Circle mesh parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleMeshConfig {
    /// Center [x, y]
    #[serde(default)]
    pub center: [f64; 2],
    /// Radius in m
    pub radius: f64,
    /// Number of elements
    pub elements: usize,
}

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Boundary integral formulation
    #[serde(default)]
    pub formulation: Formulation,

    /// Burton-Miller coupling override: β = i·scale/k (default 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_scale: Option<f64>,
}

/// Admittance applied to an element range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConditionConfig {
    /// Element range (start, end) - inclusive
    pub elements: (usize, usize),

    /// How `value` is interpreted
    #[serde(rename = "type")]
    pub bc_type: BoundaryConditionType,

    /// Value (real part)
    pub value: f64,

    /// Value (imaginary part)
    #[serde(default)]
    pub value_imag: f64,
}

/// Boundary condition type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryConditionType {
    /// Admittance Y in m/(Pa·s)
    Admittance,
    /// Admittance relative to 1/z₀
    SpecificAdmittance,
    /// Impedance Z in Pa·s/m, Y = 1/Z
    Impedance,
}

impl BoundaryConditionConfig {
    /// Admittance Y for a medium of characteristic impedance `impedance`
    pub fn admittance(&self, impedance: f64) -> Complex64 {
        let value = Complex64::new(self.value, self.value_imag);
        match self.bc_type {
            BoundaryConditionType::Admittance => value,
            BoundaryConditionType::SpecificAdmittance => value / impedance,
            BoundaryConditionType::Impedance => value.inv(),
        }
    }
}

/// Source configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Plane wave sources
    #[serde(default)]
    pub plane_waves: Vec<PlaneWaveConfig>,

    /// Line sources
    #[serde(default)]
    pub line_sources: Vec<LineSourceConfig>,
}

/// Plane wave source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneWaveConfig {
    /// Direction of propagation [x, y] (will be normalized)
    pub direction: [f64; 2],

    /// Amplitude
    pub amplitude: f64,

    /// Phase in radians
    #[serde(default)]
    pub phase: f64,
}

/// Line source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSourceConfig {
    /// Position [x, y]
    pub position: [f64; 2],

    /// Strength
    pub amplitude: f64,

    /// Phase in radians
    #[serde(default)]
    pub phase: f64,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Evaluation points file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_points_file: Option<PathBuf>,

    /// Inline evaluation points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_points: Option<Vec<[f64; 2]>>,
}

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// TOML format
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Load BEM configuration from a file
///
/// Format is auto-detected from file extension (.json or .toml)
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BemConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
    let content = fs::read_to_string(path)?;

    parse_config(&content, format)
}

/// Parse BEM configuration from a string
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<BemConfig, ConfigError> {
    match format {
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
        }
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
        }
    }
}

/// Save BEM configuration to a file
pub fn save_config<P: AsRef<Path>>(config: &BemConfig, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

    let content = serialize_config(config, format)?;
    fs::write(path, content)?;
    Ok(())
}

/// Serialize BEM configuration to a string
pub fn serialize_config(config: &BemConfig, format: ConfigFormat) -> Result<String, ConfigError> {
    match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string())),
        ConfigFormat::Toml => {
            toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serialize error
    #[error("Serialize error: {0}")]
    SerializeError(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Mesh data rejected
    #[error("Invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

impl BemConfig {
    /// Create PhysicsParams from configuration
    pub fn to_physics_params(&self) -> Result<PhysicsParams, ConfigError> {
        let physics = self
            .physics
            .as_ref()
            .ok_or_else(|| ConfigError::MissingField("physics".to_string()))?;
        Ok(PhysicsParams::new(
            physics.frequency,
            physics.speed_of_sound,
            physics.density,
        ))
    }

    fn mesh_config(&self) -> Result<&MeshConfig, ConfigError> {
        self.mesh
            .as_ref()
            .ok_or_else(|| ConfigError::MissingField("mesh".to_string()))
    }

    /// Load nodes from configuration
    pub fn load_nodes(&self, base_dir: &Path) -> Result<Array2<f64>, ConfigError> {
        let mesh = self.mesh_config()?;
        if let Some(ref nodes) = mesh.nodes {
            return Ok(points_to_array(nodes));
        }

        if let Some(ref file) = mesh.nodes_file {
            return load_points(&base_dir.join(file));
        }

        Err(ConfigError::MissingField(
            "mesh.nodes or mesh.nodes_file".to_string(),
        ))
    }

    /// Load element connectivity from configuration
    pub fn load_elements(&self, base_dir: &Path) -> Result<Vec<[usize; 2]>, ConfigError> {
        let mesh = self.mesh_config()?;
        if let Some(ref elements) = mesh.elements {
            return Ok(elements.clone());
        }

        if let Some(ref file) = mesh.elements_file {
            let path = base_dir.join(file);
            let content = fs::read_to_string(&path)?;

            if path.extension().is_some_and(|e| e == "json") {
                return serde_json::from_str(&content)
                    .map_err(|e| ConfigError::ParseError(e.to_string()));
            }
            return parse_csv_elements(&content);
        }

        Err(ConfigError::MissingField(
            "mesh.elements or mesh.elements_file".to_string(),
        ))
    }

    /// Build the mesh and apply the boundary admittances
    pub fn build_mesh(&self, base_dir: &Path, impedance: f64) -> Result<Mesh, ConfigError> {
        let mut mesh = match self.mesh_config()?.circle {
            Some(ref circle) => circle_mesh(circle.center, circle.radius, circle.elements)?,
            None => Mesh::new(
                self.load_nodes(base_dir)?,
                &self.load_elements(base_dir)?,
                None,
            )?,
        };

        for bc in &self.boundary_conditions {
            let (start, end) = bc.elements;
            if start > end {
                return Err(ConfigError::ParseError(format!(
                    "boundary condition range ({}, {}) is reversed",
                    start, end
                )));
            }
            mesh = mesh.with_admittance_range(start..end + 1, bc.admittance(impedance))?;
        }
        Ok(mesh)
    }

    /// Incident field made of all configured sources
    pub fn incident_field(&self) -> Result<IncidentField, ConfigError> {
        let plane_waves = self.sources.plane_waves.iter().map(|pw| {
            match IncidentField::plane_wave(pw.direction, pw.amplitude) {
                IncidentField::PlaneWave { direction, .. } => IncidentField::PlaneWave {
                    direction,
                    amplitude: Complex64::from_polar(pw.amplitude, pw.phase),
                },
                other => other,
            }
        });
        let line_sources = self.sources.line_sources.iter().map(|ls| IncidentField::LineSource {
            position: ls.position,
            strength: Complex64::from_polar(ls.amplitude, ls.phase),
        });

        let mut fields: Vec<IncidentField> = plane_waves.chain(line_sources).collect();
        match fields.len() {
            0 => Err(ConfigError::MissingField(
                "sources.plane_waves or sources.line_sources".to_string(),
            )),
            1 => Ok(fields.remove(0)),
            _ => Ok(IncidentField::Superposition(fields)),
        }
    }

    /// Evaluation points from configuration (empty when none are given)
    pub fn evaluation_points(&self, base_dir: &Path) -> Result<Array2<f64>, ConfigError> {
        if let Some(ref points) = self.output.evaluation_points {
            return Ok(points_to_array(points));
        }
        if let Some(ref file) = self.output.evaluation_points_file {
            return load_points(&base_dir.join(file));
        }
        Ok(Array2::zeros((0, 2)))
    }
}

fn points_to_array(points: &[[f64; 2]]) -> Array2<f64> {
    let mut arr = Array2::zeros((points.len(), 2));
    for (i, p) in points.iter().enumerate() {
        arr[[i, 0]] = p[0];
        arr[[i, 1]] = p[1];
    }
    arr
}

/// Points from a JSON array or a text file with one `x y` pair per line
fn load_points(path: &Path) -> Result<Array2<f64>, ConfigError> {
    let content = fs::read_to_string(path)?;
    if path.extension().is_some_and(|e| e == "json") {
        let points: Vec<[f64; 2]> =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        return Ok(points_to_array(&points));
    }
    parse_csv_points(&content)
}

/// Rows of at least two numeric columns; the first two are kept
///
/// Blank lines and `#` comments are skipped. Any other token that does not
/// parse is an error.
fn csv_pairs<T: std::str::FromStr + Copy>(content: &str) -> Result<Vec<[T; 2]>, ConfigError> {
    let mut pairs = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = line
            .split([',', ' ', '\t'])
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<T>().map_err(|_| {
                    ConfigError::ParseError(format!(
                        "line {}: invalid value '{}'",
                        index + 1,
                        token
                    ))
                })
            })
            .collect::<Result<Vec<T>, _>>()?;
        if values.len() < 2 {
            return Err(ConfigError::ParseError(format!(
                "line {}: expected two columns, got {}",
                index + 1,
                values.len()
            )));
        }
        pairs.push([values[0], values[1]]);
    }
    Ok(pairs)
}

/// Parse CSV points (x y per line)
fn parse_csv_points(content: &str) -> Result<Array2<f64>, ConfigError> {
    Ok(points_to_array(&csv_pairs::<f64>(content)?))
}

/// Parse CSV elements (start end per line)
fn parse_csv_elements(content: &str) -> Result<Vec<[usize; 2]>, ConfigError> {
    csv_pairs::<usize>(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "description": "Absorbing cylinder at 100 Hz",
        "physics": {
            "frequency": 1000.0,
            "speed_of_sound": 343.0,
            "density": 1.21
        },
        "mesh": {
            "nodes": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            "elements": [[0, 1], [1, 2], [2, 3], [3, 0]]
        },
        "solver": {
            "formulation": "fast_burton_miller",
            "coupling_scale": 2.0
        },
        "quadrature": {
            "gauss_order": 8,
            "near_field_factor": 3.0
        },
        "boundary_conditions": [
            {
                "elements": [1, 2],
                "type": "specific_admittance",
                "value": 1.0
            }
        ],
        "sources": {
            "plane_waves": [
                {
                    "direction": [0.0, -1.0],
                    "amplitude": 1.0
                }
            ]
        }
    }"#;

    const SAMPLE_TOML: &str = r#"
description = "Absorbing cylinder at 100 Hz"

[physics]
frequency = 1000.0
speed_of_sound = 343.0
density = 1.21

[mesh.circle]
center = [0.0, 0.0]
radius = 0.5
elements = 24

[solver]
formulation = "kirchhoff_helmholtz"

[[boundary_conditions]]
elements = [0, 23]
type = "impedance"
value = 686.0

[sources]
[[sources.line_sources]]
position = [2.0, 0.0]
amplitude = 1.0

[[sources.plane_waves]]
direction = [1.0, 0.0]
amplitude = 0.5
"#;

    #[test]
    fn test_parse_json() {
        let config = parse_config(SAMPLE_JSON, ConfigFormat::Json).unwrap();

        assert_eq!(config.description, "Absorbing cylinder at 100 Hz");
        assert!((config.physics.as_ref().unwrap().frequency - 1000.0).abs() < 0.01);
        assert_eq!(config.solver.formulation, Formulation::FastBurtonMiller);
        assert_eq!(config.solver.coupling_scale, Some(2.0));
        assert_eq!(config.quadrature.gauss_order, 8);
        assert_eq!(config.quadrature.near_field_factor, 3.0);
        assert_eq!(config.quadrature.epsrel, QuadratureParams::default().epsrel);
        assert_eq!(config.boundary_conditions.len(), 1);
        assert_eq!(config.sources.plane_waves.len(), 1);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config, BemConfig::default());
        assert_eq!(config.solver.formulation, Formulation::BurtonMiller);
        assert!(matches!(
            config.to_physics_params(),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let config = parse_config(SAMPLE_TOML, ConfigFormat::Toml).unwrap();

        assert_eq!(config.solver.formulation, Formulation::KirchhoffHelmholtz);
        let circle = config.mesh.as_ref().unwrap().circle.as_ref().unwrap();
        assert_eq!(circle.elements, 24);
        assert_eq!(config.sources.line_sources.len(), 1);
    }

    #[test]
    fn test_build_mesh_with_admittances() {
        let config = parse_config(SAMPLE_JSON, ConfigFormat::Json).unwrap();
        let physics = config.to_physics_params().unwrap();
        let mesh = config.build_mesh(Path::new("."), physics.impedance).unwrap();

        assert_eq!(mesh.num_elements(), 4);
        let y = mesh.admittances();
        let expected = Complex64::new(1.0 / physics.impedance, 0.0);
        assert_eq!(y[0], Complex64::new(0.0, 0.0));
        assert!((y[1] - expected).norm() < 1e-15);
        assert!((y[2] - expected).norm() < 1e-15);
        assert_eq!(y[3], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_build_circle_mesh_with_impedance() {
        let config = parse_config(SAMPLE_TOML, ConfigFormat::Toml).unwrap();
        let mesh = config.build_mesh(Path::new("."), 415.0).unwrap();

        assert_eq!(mesh.num_elements(), 24);
        for y in mesh.admittances().iter() {
            assert!((y - Complex64::new(1.0 / 686.0, 0.0)).norm() < 1e-15);
        }
    }

    #[test]
    fn test_boundary_range_out_of_mesh() {
        let mut config = parse_config(SAMPLE_JSON, ConfigFormat::Json).unwrap();
        config.boundary_conditions[0].elements = (2, 9);
        assert!(matches!(
            config.build_mesh(Path::new("."), 415.0),
            Err(ConfigError::Mesh(_))
        ));
    }

    #[test]
    fn test_incident_field_from_sources() {
        let config = parse_config(SAMPLE_JSON, ConfigFormat::Json).unwrap();
        assert!(matches!(
            config.incident_field().unwrap(),
            IncidentField::PlaneWave { direction, .. } if direction == [0.0, -1.0]
        ));

        let config = parse_config(SAMPLE_TOML, ConfigFormat::Toml).unwrap();
        match config.incident_field().unwrap() {
            IncidentField::Superposition(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected superposition, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_json() {
        let config = parse_config(SAMPLE_JSON, ConfigFormat::Json).unwrap();
        let serialized = serialize_config(&config, ConfigFormat::Json).unwrap();

        let reparsed = parse_config(&serialized, ConfigFormat::Json).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_serialize_toml() {
        let config = parse_config(SAMPLE_TOML, ConfigFormat::Toml).unwrap();
        let serialized = serialize_config(&config, ConfigFormat::Toml).unwrap();

        let reparsed = parse_config(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("a/b.JSON"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path("case.toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path("case.inp"), None);
        assert!(matches!(
            load_config("case.inp"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_csv() {
        let points = parse_csv_points("# x y\n0.0 0.0\n1.0, 0.5\n\n0.5\t1.0").unwrap();
        assert_eq!(points.nrows(), 3);
        assert!((points[[1, 1]] - 0.5).abs() < 1e-15);

        let elements = parse_csv_elements("0, 1\n1 2").unwrap();
        assert_eq!(elements, vec![[0, 1], [1, 2]]);
    }

    #[test]
    fn test_parse_csv_rejects_bad_tokens() {
        let err = parse_csv_points("0.0 0.0\n1.0 x 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(ref msg) if msg.contains("line 2")));

        assert!(matches!(
            parse_csv_points("0.0 0.0\n0.5"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            parse_csv_elements("0 1\n1 -2"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_evaluation_points_default_empty() {
        let config = BemConfig::default();
        assert_eq!(config.evaluation_points(Path::new(".")).unwrap().nrows(), 0);
    }
}
