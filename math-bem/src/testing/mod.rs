//! Validation against analytical 2D solutions
//!
//! Tools for comparing BEM results with analytical solutions, computing
//! error metrics, and exporting them to JSON.

use anyhow::ensure;
use math_audio_wave2d::analytical::AnalyticalSolution;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative L2 error ‖reference − result‖₂ / ‖reference‖₂
///
/// Falls back to the absolute error when the reference vanishes.
///
/// ```
/// use math_audio_bem2d::testing::complex_relative_error;
/// use num_complex::Complex64;
///
/// let reference = [Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)];
/// let result = [Complex64::new(3.0, 0.0), Complex64::new(0.0, 3.5)];
/// assert!((complex_relative_error(&reference, &result) - 0.1).abs() < 1e-15);
/// ```
pub fn complex_relative_error(reference: &[Complex64], result: &[Complex64]) -> f64 {
    let diff = reference
        .iter()
        .zip(result)
        .map(|(a, b)| (a - b).norm_sqr())
        .sum::<f64>()
        .sqrt();
    let norm = reference.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
    if norm > 1e-15 { diff / norm } else { diff }
}

/// Comparison between BEM and analytical solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Test name
    pub test_name: String,

    /// Test parameters
    pub parameters: TestParameters,

    /// Analytical solution data
    pub analytical: SolutionData,

    /// BEM solution data
    pub bem: SolutionData,

    /// Error metrics
    pub errors: ErrorMetrics,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Test parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestParameters {
    /// Wave number k
    pub wave_number: f64,

    /// Frequency (Hz)
    pub frequency: f64,

    /// Wavelength (m)
    pub wavelength: f64,

    /// Characteristic dimension (radius, length, etc.)
    pub characteristic_dimension: f64,

    /// Dimensionless parameter (ka, kL, etc.)
    pub dimensionless_param: f64,

    /// Number of elements in BEM mesh
    pub num_elements: Option<usize>,

    /// Metadata of the analytical solution
    #[serde(default)]
    pub custom: serde_json::Value,
}

/// Solution data (positions and pressure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionData {
    /// Evaluation positions [[x, y], ...]
    pub positions: Vec<[f64; 2]>,

    /// Real part of pressure
    pub pressure_real: Vec<f64>,

    /// Imaginary part of pressure
    pub pressure_imag: Vec<f64>,

    /// Magnitude |p|
    pub magnitude: Vec<f64>,

    /// Phase arg(p) in radians
    pub phase: Vec<f64>,
}

impl SolutionData {
    fn new(positions: Vec<[f64; 2]>, pressure: &[Complex64]) -> Self {
        Self {
            positions,
            pressure_real: pressure.iter().map(|p| p.re).collect(),
            pressure_imag: pressure.iter().map(|p| p.im).collect(),
            magnitude: pressure.iter().map(|p| p.norm()).collect(),
            phase: pressure.iter().map(|p| p.arg()).collect(),
        }
    }
}

/// Error metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Relative L2 error: ||p_bem - p_analytical||₂ / ||p_analytical||₂
    pub l2_relative: f64,

    /// Absolute L2 error: ||p_bem - p_analytical||₂
    pub l2_absolute: f64,

    /// L∞ error: max|p_bem - p_analytical|
    pub linf: f64,

    /// Mean absolute error
    pub mean_absolute: f64,

    /// Maximum relative error at any point
    pub max_relative: f64,

    /// Pointwise errors (for plotting)
    pub pointwise_errors: Vec<f64>,
}

/// Execution metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Git commit hash
    pub git_commit: String,

    /// Execution time (milliseconds)
    pub execution_time_ms: u64,

    /// Library version
    pub bem_version: String,
}

impl ValidationResult {
    /// Create from analytical and BEM solutions at the same points
    pub fn new(
        test_name: impl Into<String>,
        analytical: &AnalyticalSolution,
        bem_pressure: &[Complex64],
        num_elements: Option<usize>,
        execution_time_ms: u64,
    ) -> anyhow::Result<Self> {
        let errors = ErrorMetrics::compute(&analytical.pressure, bem_pressure)?;

        let positions: Vec<[f64; 2]> = analytical.positions.iter().map(|p| [p.x, p.y]).collect();

        let characteristic_dimension = analytical
            .metadata
            .get("radius")
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0);

        let parameters = TestParameters {
            wave_number: analytical.wave_number,
            frequency: analytical.frequency,
            wavelength: 2.0 * std::f64::consts::PI / analytical.wave_number,
            characteristic_dimension,
            dimensionless_param: analytical.wave_number * characteristic_dimension,
            num_elements,
            custom: analytical.metadata.clone(),
        };

        let metadata = ExecutionMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            git_commit: crate::GIT_HASH.to_string(),
            execution_time_ms,
            bem_version: crate::VERSION.to_string(),
        };

        Ok(Self {
            test_name: test_name.into(),
            parameters,
            analytical: SolutionData::new(positions.clone(), &analytical.pressure),
            bem: SolutionData::new(positions, bem_pressure),
            errors,
            metadata,
        })
    }

    /// Save to JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file
    pub fn load_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let result = serde_json::from_str(&json)?;
        Ok(result)
    }

    /// Log a one-line summary
    pub fn log_summary(&self) {
        log::info!(
            "{}: ka = {:.3}, L2 rel = {:.3e}, L∞ = {:.3e}, {} ms",
            self.test_name,
            self.parameters.dimensionless_param,
            self.errors.l2_relative,
            self.errors.linf,
            self.metadata.execution_time_ms
        );
    }

    /// Check if test passed (based on error threshold)
    pub fn passed(&self, l2_threshold: f64) -> bool {
        self.errors.l2_relative < l2_threshold
    }
}

impl ErrorMetrics {
    /// Compute all error metrics
    pub fn compute(analytical: &[Complex64], bem: &[Complex64]) -> anyhow::Result<Self> {
        ensure!(
            analytical.len() == bem.len(),
            "analytical and BEM results differ in length: {} vs {}",
            analytical.len(),
            bem.len()
        );
        ensure!(!analytical.is_empty(), "no points to compare");

        let n = analytical.len() as f64;
        let pointwise_errors: Vec<f64> = analytical
            .iter()
            .zip(bem.iter())
            .map(|(a, b)| (a - b).norm())
            .collect();

        let l2_absolute = pointwise_errors.iter().map(|e| e * e).sum::<f64>().sqrt();
        let l2_relative = complex_relative_error(analytical, bem);
        let linf = pointwise_errors.iter().cloned().fold(0.0_f64, f64::max);
        let mean_absolute = pointwise_errors.iter().sum::<f64>() / n;

        let max_relative = analytical
            .iter()
            .zip(pointwise_errors.iter())
            .map(|(a, e)| {
                let a_norm = a.norm();
                if a_norm > 1e-15 { e / a_norm } else { *e }
            })
            .fold(0.0_f64, f64::max);

        Ok(Self {
            l2_relative,
            l2_absolute,
            linf,
            mean_absolute,
            max_relative,
            pointwise_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use math_audio_wave2d::Point;
    use math_audio_wave2d::analytical::plane_wave_2d;

    #[test]
    fn test_error_metrics_perfect_match() {
        let data = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.5, 0.5),
            Complex64::new(0.0, 1.0),
        ];

        let errors = ErrorMetrics::compute(&data, &data).unwrap();

        assert!(errors.l2_relative < 1e-10);
        assert!(errors.l2_absolute < 1e-10);
        assert!(errors.linf < 1e-10);
    }

    #[test]
    fn test_error_metrics_nonzero() {
        let analytical = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 2.0)];
        let bem = vec![Complex64::new(1.1, 0.0), Complex64::new(0.0, 2.0)];

        let errors = ErrorMetrics::compute(&analytical, &bem).unwrap();

        assert_relative_eq!(errors.linf, 0.1, epsilon = 1e-12);
        assert_relative_eq!(errors.max_relative, 0.1, epsilon = 1e-12);
        assert_relative_eq!(errors.l2_relative, 0.1 / 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(errors.mean_absolute, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_error_metrics_length_mismatch() {
        let a = vec![Complex64::new(1.0, 0.0)];
        assert!(ErrorMetrics::compute(&a, &[]).is_err());
    }

    #[test]
    fn test_relative_error_zero_reference() {
        let zero = [Complex64::new(0.0, 0.0); 2];
        let result = [Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)];
        assert_relative_eq!(complex_relative_error(&zero, &result), 5.0);
    }

    #[test]
    fn test_validation_result_json() {
        let points = vec![Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let analytical = plane_wave_2d(2.0, 0.0, Complex64::new(1.0, 0.0), points);
        let bem: Vec<Complex64> = analytical.pressure.iter().map(|p| p * 1.001).collect();

        let result = ValidationResult::new("plane wave", &analytical, &bem, Some(10), 3).unwrap();
        assert!(result.passed(0.01));
        assert!(!result.passed(1e-4));
        assert_eq!(result.analytical.positions[1], [0.0, 1.0]);

        let json = serde_json::to_string(&result).unwrap();
        let parsed: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.test_name, "plane wave");
        assert_eq!(parsed.parameters.num_elements, Some(10));
    }
}
