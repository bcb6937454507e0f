//! Post-processing of surface solutions
//!
//! - [`pressure`] - Scattered and total pressure at field points

pub mod pressure;

pub use pressure::{
    AdmittanceFieldIntegrand, FieldPoint, FieldPointIntegrand, calc_solution_at,
    circle_eval_points, total_field_at,
};
