use std::fmt;

use thiserror::Error;

use crate::span::{Bytes, Span};

/// An error that can be traced back to a location in the source code.
pub trait PositionalError {
    fn range(&self) -> Span;
    fn describe(&self) -> String;

    fn length(&self) -> Bytes {
        self.range().length()
    }
}

/// The compilation phase in which an error was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
}
impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Phase::Lexical => "lexical error",
            Phase::Syntax => "syntax error",
            Phase::Semantic => "semantic error",
        })
    }
}

/// A phase-independent compilation error, as reported to the user.
#[derive(Debug, Error)]
#[error("{phase}: {message}")]
pub struct CompileError {
    phase: Phase,
    message: String,
    span: Span,
}
impl CompileError {
    pub fn new(phase: Phase, message: String, span: Span) -> Self {
        Self {
            phase,
            message,
            span,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
impl PositionalError for CompileError {
    fn range(&self) -> Span {
        self.span
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}
