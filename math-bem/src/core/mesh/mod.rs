//! Mesh geometry helpers and generators

pub mod element;
pub mod generators;

pub use element::*;
pub use generators::*;
