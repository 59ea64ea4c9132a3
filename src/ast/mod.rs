//! Abstract Syntax Tree definitions
mod nodes;
mod scalar;

pub use nodes::*;
pub use scalar::*;
