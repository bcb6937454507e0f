//! Input/Output for BEM solver

pub mod native;

pub use native::*;
