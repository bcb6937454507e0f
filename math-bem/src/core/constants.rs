//! Physical constants

pub use super::types::PhysicsParams;

/// Default speed of sound in air (m/s) at 20°C
pub const DEFAULT_SPEED_OF_SOUND: f64 = 343.0;

/// Default air density (kg/m³) at 20°C
pub const DEFAULT_DENSITY: f64 = 1.21;
