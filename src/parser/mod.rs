//! Converts a token stream into an abstract syntax tree.
mod error;
mod parser;
mod parser_base;

pub use error::{ParseError, Reason, Stage};
pub use parser::parse;
