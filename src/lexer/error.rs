//! Errors produced while lexing.
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::{
    error::{CompileError, Phase, PositionalError},
    span::*,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorType {
    #[error("invalid integer literal: {0}")]
    IntegerLiteral(String),
    #[error("invalid float literal: {0}")]
    FloatLiteral(String),
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("invalid symbol")]
    UnknownToken,
}

#[derive(Error, Debug)]
pub struct LexError {
    pub span: Span,
    pub error_type: ErrorType,
}

impl LexError {
    pub fn length(&self) -> Bytes {
        self.span.length()
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.error_type))
    }
}

impl PositionalError for LexError {
    fn range(&self) -> Span {
        self.span
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl From<LexError> for CompileError {
    fn from(error: LexError) -> Self {
        Self::new(Phase::Lexical, error.to_string(), error.span)
    }
}
