//! Declaration processing and identifier resolution.
mod error;
mod symbol_table;

pub use error::*;
pub use symbol_table::SymbolTable;
