//! Intermediate code generation.

mod generator;
mod label_generator;
mod name_generator;
mod quad;

pub use generator::{generate, Generated};
pub use quad::*;
